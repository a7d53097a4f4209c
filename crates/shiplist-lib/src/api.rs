//! Blocking client for the World of Warships public API.
//!
//! Every endpoint shares the same envelope: a JSON object with a
//! top-level `status` field, a `data` payload, and optional pagination
//! `meta`. The envelope is decoded once here; endpoint methods only
//! describe their query parameters and payload shape.

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

const DEFAULT_API_BASE: &str = "https://api.worldofwarships.asia";
const API_BASE_ENV: &str = "SHIPLIST_API_BASE";

/// Encyclopedia responses are requested in the language the tool was
/// originally written for.
const ENCYCLOPEDIA_LANGUAGE: &str = "ja";

const CLANS_LIST_PATH: &str = "/wows/clans/list/";
const CLANS_INFO_PATH: &str = "/wows/clans/info/";
pub(crate) const ACCOUNT_INFO_PATH: &str = "/wows/account/info/";
pub(crate) const ENCYCLOPEDIA_SHIPS_PATH: &str = "/wows/encyclopedia/ships/";
const SHIPS_STATS_PATH: &str = "/wows/ships/stats/";

/// Clan search candidate returned by the clan-list endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ClanRecord {
    pub tag: String,
    pub clan_id: u64,
}

/// Raw ship attributes as returned by one encyclopedia page.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RawShip {
    pub tier: u32,
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
    pub nation: String,
}

/// One page of the ship encyclopedia.
#[derive(Debug)]
pub struct ShipsPage {
    /// Ship identifier key (as transported, a decimal string) to raw attributes.
    pub ships: BTreeMap<String, RawShip>,
    /// Total number of pages reported by the endpoint.
    pub page_total: u32,
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    status: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    meta: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PageMeta {
    page_total: u32,
}

#[derive(Debug, Deserialize)]
struct ClanDetails {
    members_ids: Vec<u64>,
}

#[derive(Debug, Deserialize)]
struct AccountRecord {
    nickname: String,
}

#[derive(Debug, Deserialize)]
struct OwnedShip {
    ship_id: u64,
}

/// Blocking client bound to one application ID and API base URL.
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    application_id: String,
}

impl ApiClient {
    /// Build a client for the default API region.
    ///
    /// The base URL may be overridden through the `SHIPLIST_API_BASE`
    /// environment variable so tests and other regions can redirect the
    /// client without code changes.
    pub fn new<T: Into<String>>(application_id: T) -> Result<Self> {
        let base_url = env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::with_base_url(application_id, base_url)
    }

    /// Build a client against an explicit base URL.
    pub fn with_base_url<T: Into<String>, U: Into<String>>(
        application_id: T,
        base_url: U,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent())
            .build()
            .map_err(Error::Http)?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            application_id: application_id.into(),
        })
    }

    /// Search for clans whose tag contains the given text.
    pub fn search_clans(&self, tag: &str) -> Result<Vec<ClanRecord>> {
        let (candidates, _) = self.call::<Vec<ClanRecord>>(
            CLANS_LIST_PATH,
            &[
                ("search", tag.to_string()),
                ("fields", "tag,clan_id".to_string()),
            ],
        )?;
        debug!(tag, candidates = candidates.len(), "clan search complete");
        Ok(candidates)
    }

    /// Fetch the member account identifiers of a clan, in API order.
    pub fn clan_member_ids(&self, clan_id: u64) -> Result<Vec<u64>> {
        let (mut clans, _) = self.call::<HashMap<String, ClanDetails>>(
            CLANS_INFO_PATH,
            &[
                ("clan_id", clan_id.to_string()),
                ("fields", "members_ids".to_string()),
            ],
        )?;
        let details = clans
            .remove(&clan_id.to_string())
            .ok_or_else(|| Error::MalformedResponse {
                endpoint: CLANS_INFO_PATH,
                message: format!("no entry for clan {clan_id}"),
            })?;
        Ok(details.members_ids)
    }

    /// Fetch nicknames for all account identifiers in one batched call.
    pub fn account_nicknames(&self, account_ids: &[u64]) -> Result<HashMap<u64, String>> {
        let joined = account_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let (records, _) = self.call::<HashMap<String, Option<AccountRecord>>>(
            ACCOUNT_INFO_PATH,
            &[
                ("account_id", joined),
                ("fields", "nickname".to_string()),
            ],
        )?;

        let mut nicknames = HashMap::with_capacity(records.len());
        for (key, record) in records {
            let account_id = parse_id(ACCOUNT_INFO_PATH, &key)?;
            let record = record.ok_or_else(|| Error::MalformedResponse {
                endpoint: ACCOUNT_INFO_PATH,
                message: format!("no nickname returned for account {account_id}"),
            })?;
            nicknames.insert(account_id, record.nickname);
        }
        Ok(nicknames)
    }

    /// Fetch one page of the ship encyclopedia.
    pub fn ships_page(&self, page_no: u32) -> Result<ShipsPage> {
        let (ships, meta) = self.call::<BTreeMap<String, RawShip>>(
            ENCYCLOPEDIA_SHIPS_PATH,
            &[
                ("language", ENCYCLOPEDIA_LANGUAGE.to_string()),
                ("fields", "type,tier,name,nation".to_string()),
                ("page_no", page_no.to_string()),
            ],
        )?;
        let meta = meta.ok_or(Error::MalformedResponse {
            endpoint: ENCYCLOPEDIA_SHIPS_PATH,
            message: "missing pagination metadata".to_string(),
        })?;
        let meta: PageMeta =
            serde_json::from_value(meta).map_err(|err| Error::MalformedResponse {
                endpoint: ENCYCLOPEDIA_SHIPS_PATH,
                message: format!("undecodable pagination metadata: {err}"),
            })?;
        debug!(page_no, ships = ships.len(), "fetched encyclopedia page");
        Ok(ShipsPage {
            ships,
            page_total: meta.page_total,
        })
    }

    /// Fetch the identifiers of all ships an account has statistics for.
    pub fn owned_ship_ids(&self, account_id: u64) -> Result<Vec<u64>> {
        let (mut stats, _) = self.call::<HashMap<String, Option<Vec<OwnedShip>>>>(
            SHIPS_STATS_PATH,
            &[
                ("account_id", account_id.to_string()),
                ("fields", "ship_id".to_string()),
            ],
        )?;
        let owned = stats
            .remove(&account_id.to_string())
            .flatten()
            .ok_or_else(|| Error::MalformedResponse {
                endpoint: SHIPS_STATS_PATH,
                message: format!("no ship statistics returned for account {account_id}"),
            })?;
        Ok(owned.into_iter().map(|ship| ship.ship_id).collect())
    }

    /// Issue one GET request and decode the shared response envelope.
    fn call<T: DeserializeOwned>(
        &self,
        path: &'static str,
        query: &[(&str, String)],
    ) -> Result<(T, Option<serde_json::Value>)> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "issuing API request");
        let response = self
            .http
            .get(&url)
            .query(&[("application_id", self.application_id.as_str())])
            .query(query)
            .send()?
            .error_for_status()?;
        let body = response.text()?;
        decode_envelope(path, &body)
    }
}

/// Decode the shared `{status, data, meta}` envelope from a response body.
///
/// The body is kept verbatim in the error when the status is not "ok" so
/// the API's own error description survives into the log.
fn decode_envelope<T: DeserializeOwned>(
    endpoint: &'static str,
    body: &str,
) -> Result<(T, Option<serde_json::Value>)> {
    let envelope: RawEnvelope =
        serde_json::from_str(body).map_err(|err| Error::MalformedResponse {
            endpoint,
            message: format!("undecodable body: {err}"),
        })?;

    if envelope.status != "ok" {
        return Err(Error::ApiStatus {
            endpoint,
            body: body.to_string(),
        });
    }

    let data = envelope
        .data
        .filter(|value| !value.is_null())
        .ok_or(Error::MissingData { endpoint })?;
    let data = serde_json::from_value(data).map_err(|err| Error::MalformedResponse {
        endpoint,
        message: format!("unexpected payload shape: {err}"),
    })?;

    Ok((data, envelope.meta.filter(|value| !value.is_null())))
}

/// Parse an identifier transported as a JSON object key.
pub(crate) fn parse_id(endpoint: &'static str, raw: &str) -> Result<u64> {
    raw.parse::<u64>().map_err(|_| Error::MalformedResponse {
        endpoint,
        message: format!("non-numeric identifier {raw}"),
    })
}

fn user_agent() -> String {
    format!(
        "shiplist-lib/{version} ({repo})",
        version = env!("CARGO_PKG_VERSION"),
        repo = "https://github.com/shiplist/shiplist-rs"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_ok_status_keeps_the_raw_body() {
        let body = r#"{"status":"error","error":{"message":"INVALID_APPLICATION_ID"}}"#;
        let err = decode_envelope::<Vec<ClanRecord>>(CLANS_LIST_PATH, body).unwrap_err();
        match err {
            Error::ApiStatus { endpoint, body } => {
                assert_eq!(endpoint, CLANS_LIST_PATH);
                assert!(body.contains("INVALID_APPLICATION_ID"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn ok_status_with_null_data_is_rejected() {
        let body = r#"{"status":"ok","data":null}"#;
        let err = decode_envelope::<Vec<ClanRecord>>(CLANS_LIST_PATH, body).unwrap_err();
        assert!(matches!(err, Error::MissingData { .. }));
    }

    #[test]
    fn clan_search_payload_decodes() {
        let body = r#"{"status":"ok","meta":{"count":2},"data":[
            {"tag":"ABC","clan_id":101},
            {"tag":"ABCD","clan_id":102}
        ]}"#;
        let (candidates, _) =
            decode_envelope::<Vec<ClanRecord>>(CLANS_LIST_PATH, body).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].tag, "ABC");
        assert_eq!(candidates[0].clan_id, 101);
    }

    #[test]
    fn encyclopedia_page_payload_and_meta_decode() {
        let body = r#"{"status":"ok","meta":{"count":1,"page_total":3,"page":1},"data":{
            "3340112":{"tier":5,"type":"Cruiser","name":"Foo","nation":"usa"}
        }}"#;
        let (ships, meta) =
            decode_envelope::<BTreeMap<String, RawShip>>(ENCYCLOPEDIA_SHIPS_PATH, body).unwrap();
        assert_eq!(ships.len(), 1);
        assert_eq!(ships["3340112"].type_name, "Cruiser");
        let meta: PageMeta = serde_json::from_value(meta.unwrap()).unwrap();
        assert_eq!(meta.page_total, 3);
    }

    #[test]
    fn hidden_account_stats_decode_to_none() {
        let body = r#"{"status":"ok","data":{"1001":null}}"#;
        let (mut stats, _) = decode_envelope::<HashMap<String, Option<Vec<OwnedShip>>>>(
            SHIPS_STATS_PATH,
            body,
        )
        .unwrap();
        assert!(stats.remove("1001").flatten().is_none());
    }

    #[test]
    fn non_numeric_identifier_keys_are_rejected() {
        let err = parse_id(ACCOUNT_INFO_PATH, "abc").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }
}
