use serde::{Deserialize, Serialize};

use crate::core::Trendline;
use crate::error::{ChartError, ChartResult};

pub const TRENDLINES_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendlinesJsonContractV1 {
    pub schema_version: u32,
    pub trendlines: Vec<Trendline>,
}

#[derive(Serialize)]
struct TrendlinesJsonContractV1Ref<'a> {
    schema_version: u32,
    trendlines: &'a [Trendline],
}

pub fn trendlines_to_json_contract_v1(trendlines: &[Trendline]) -> ChartResult<String> {
    let payload = TrendlinesJsonContractV1Ref {
        schema_version: TRENDLINES_JSON_SCHEMA_V1,
        trendlines,
    };
    serde_json::to_string(&payload).map_err(|e| {
        ChartError::InvalidData(format!("failed to serialize trendlines contract v1: {e}"))
    })
}

/// Parses either the v1 contract or a bare trendline array (legacy format).
pub fn trendlines_from_json_compat_str(input: &str) -> ChartResult<Vec<Trendline>> {
    if let Ok(trendlines) = serde_json::from_str::<Vec<Trendline>>(input) {
        return Ok(trendlines);
    }
    let payload: TrendlinesJsonContractV1 = serde_json::from_str(input).map_err(|e| {
        ChartError::MalformedPersistedData(format!("failed to parse trendlines payload: {e}"))
    })?;
    if payload.schema_version != TRENDLINES_JSON_SCHEMA_V1 {
        return Err(ChartError::MalformedPersistedData(format!(
            "unsupported trendlines schema version: {}",
            payload.schema_version
        )));
    }
    Ok(payload.trendlines)
}
