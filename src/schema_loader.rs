//! Bundled JSON Schemas for the three input inventories.
//!
//! Inventories are validated before deserialization so a malformed artifact
//! reports every violation at once instead of the first serde error.

use crate::collectors::Collector;
use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;

const BASELINE_SCHEMA: &str = include_str!("../schema/baseline_inventory.schema.json");
const CAPTURE_SCHEMA: &str = include_str!("../schema/capture_inventory.schema.json");
const STATIC_SCHEMA: &str = include_str!("../schema/static_inventory.schema.json");

fn schema_source(collector: Collector) -> &'static str {
    match collector {
        Collector::Baseline => BASELINE_SCHEMA,
        Collector::Capture => CAPTURE_SCHEMA,
        Collector::Static => STATIC_SCHEMA,
    }
}

pub(crate) fn compile_inventory_schema(collector: Collector) -> Result<JSONSchema> {
    let raw: Value = serde_json::from_str(schema_source(collector))
        .with_context(|| format!("parsing bundled {} inventory schema", collector.as_str()))?;
    JSONSchema::compile(&raw).map_err(|err| {
        anyhow!(
            "compiling bundled {} inventory schema: {err}",
            collector.as_str()
        )
    })
}

/// Validate a parsed inventory document against its bundled schema.
pub(crate) fn validate_inventory(collector: Collector, instance: &Value) -> Result<()> {
    let compiled = compile_inventory_schema(collector)?;
    if let Err(errors) = compiled.validate(instance) {
        let details = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        bail!(
            "{} inventory failed schema validation:\n{}",
            collector.as_str(),
            details
        );
    }
    Ok(())
}
