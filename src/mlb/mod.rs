pub mod types;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use types::{
    League, LeaguesEnvelope, PeopleEnvelope, Player, StandingsEnvelope, Team, TeamStanding,
    TeamsEnvelope,
};

/// League ids on the upstream API.
pub const AMERICAN_LEAGUE_ID: u32 = 103;
pub const NATIONAL_LEAGUE_ID: u32 = 104;

#[derive(Debug, Error)]
pub enum MlbError {
    #[error("no such resource upstream")]
    NotFound,

    #[error("stats request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Read-only client for the public MLB stats API.
#[derive(Clone)]
pub struct MlbClient {
    http: Client,
    base_url: String,
}

impl MlbClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, MlbError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "stats request");
        let res = self.http.get(&url).query(query).send().await?;
        if res.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MlbError::NotFound);
        }
        Ok(res.error_for_status()?.json::<T>().await?)
    }

    pub async fn leagues(&self) -> Result<Vec<League>, MlbError> {
        let envelope: LeaguesEnvelope = self.get("leagues", &[]).await?;
        Ok(envelope.leagues)
    }

    /// Standings for one league, flattened across divisions and ordered by
    /// winning percentage, best first.
    pub async fn standings(&self, league_id: u32) -> Result<Vec<TeamStanding>, MlbError> {
        let envelope: StandingsEnvelope = self
            .get("standings", &[("leagueId", league_id.to_string())])
            .await?;
        Ok(flatten_standings(envelope))
    }

    pub async fn team(&self, team_id: i32) -> Result<Team, MlbError> {
        let envelope: TeamsEnvelope = self.get(&format!("teams/{team_id}"), &[]).await?;
        envelope.teams.into_iter().next().ok_or(MlbError::NotFound)
    }

    pub async fn player(&self, player_id: i32) -> Result<Player, MlbError> {
        let envelope: PeopleEnvelope = self.get(&format!("people/{player_id}"), &[]).await?;
        envelope.people.into_iter().next().ok_or(MlbError::NotFound)
    }
}

fn flatten_standings(envelope: StandingsEnvelope) -> Vec<TeamStanding> {
    let mut rows: Vec<TeamStanding> = envelope
        .records
        .into_iter()
        .flat_map(|division| division.team_records)
        .collect();
    rows.sort_by(|a, b| b.pct_value().total_cmp(&a.pct_value()));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_merges_divisions_and_sorts_by_pct() {
        let envelope: StandingsEnvelope = serde_json::from_value(serde_json::json!({
            "records": [
                {
                    "teamRecords": [
                        { "team": { "id": 1, "name": "Low" }, "winningPercentage": ".400" },
                        { "team": { "id": 2, "name": "High" }, "winningPercentage": ".650" }
                    ]
                },
                {
                    "teamRecords": [
                        { "team": { "id": 3, "name": "Mid" }, "winningPercentage": ".500" }
                    ]
                }
            ]
        }))
        .unwrap();

        let rows = flatten_standings(envelope);
        let names: Vec<_> = rows
            .iter()
            .map(|r| r.team.name.as_deref().unwrap())
            .collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
    }

    #[test]
    fn flatten_puts_rows_without_pct_last() {
        let envelope: StandingsEnvelope = serde_json::from_value(serde_json::json!({
            "records": [
                {
                    "teamRecords": [
                        { "team": { "id": 1, "name": "Unknown" } },
                        { "team": { "id": 2, "name": "Known" }, "winningPercentage": ".300" }
                    ]
                }
            ]
        }))
        .unwrap();

        let rows = flatten_standings(envelope);
        assert_eq!(rows[0].team.name.as_deref(), Some("Known"));
        assert_eq!(rows[1].team.name.as_deref(), Some("Unknown"));
    }

    #[test]
    fn flatten_of_empty_envelope_is_empty() {
        let envelope: StandingsEnvelope = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(flatten_standings(envelope).is_empty());
    }
}
