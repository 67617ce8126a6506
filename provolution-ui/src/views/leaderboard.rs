//! Weekly, monthly and regional rankings.

use std::fmt::Write as _;

use provolution_core::{ApiError, Leaderboard, LeaderboardScope};
use provolution_http::ApiClient;

pub struct LeaderboardView<'a> {
    client: &'a ApiClient,
}

impl<'a> LeaderboardView<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn show(&self, scope: &LeaderboardScope, limit: u32) -> Result<String, ApiError> {
        let board = self.client.leaderboard(scope, limit).await?;
        Ok(render_leaderboard(scope, &board))
    }
}

pub fn render_leaderboard(scope: &LeaderboardScope, board: &Leaderboard) -> String {
    let mut out = format!(
        "{} ({} – {})\n",
        scope.title(),
        board.period.start.format("%d.%m.%Y"),
        board.period.end.format("%d.%m.%Y")
    );
    if board.rankings.is_empty() {
        out.push_str("  Nobody ranked yet.\n");
    }
    for entry in &board.rankings {
        let _ = writeln!(
            out,
            "  {:>3}. {} {:<20} {:>10.1} {}",
            entry.rank,
            entry.user.avatar_emoji,
            entry.user.name(),
            entry.score,
            entry.metric
        );
    }
    if let Some(mine) = &board.my_rank {
        let _ = writeln!(
            out,
            "Your rank: {} (score {:.1}, {} above, {} below)",
            mine.rank, mine.score, mine.users_above, mine.users_below
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use provolution_core::{LeaderboardEntry, LeaderboardPeriod, MyRank, UserBrief};

    use super::*;

    fn period() -> LeaderboardPeriod {
        LeaderboardPeriod {
            start: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
        }
    }

    #[test]
    fn renders_rankings_and_own_rank() {
        let board = Leaderboard {
            period: period(),
            rankings: vec![LeaderboardEntry {
                rank: 1,
                user: UserBrief {
                    id: 3,
                    username: "kai".to_string(),
                    display_name: None,
                    avatar_emoji: "🚲".to_string(),
                },
                score: 412.5,
                metric: "co2_kg".to_string(),
            }],
            my_rank: Some(MyRank {
                rank: 7,
                score: 120.0,
                users_above: 6,
                users_below: 20,
            }),
        };

        let text = render_leaderboard(&LeaderboardScope::Weekly, &board);

        assert!(text.starts_with("Weekly leaderboard (03.03.2025 – 09.03.2025)\n"));
        assert!(text.contains("1. 🚲 kai"));
        assert!(text.ends_with("Your rank: 7 (score 120.0, 6 above, 20 below)\n"));
    }

    #[test]
    fn empty_board_says_so() {
        let board = Leaderboard {
            period: period(),
            rankings: Vec::new(),
            my_rank: None,
        };
        let text = render_leaderboard(&LeaderboardScope::Regional("NRW".to_string()), &board);
        assert_eq!(text, "Leaderboard NRW (03.03.2025 – 09.03.2025)\n  Nobody ranked yet.\n");
    }
}
