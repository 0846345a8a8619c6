use std::{fs, io, io::Read};

use serde_json::Value;

use crate::errors::ToolError;

/// Read text from a file, or from stdin when `source` is `-`.
pub fn read_input(source: &str) -> Result<String, ToolError> {
    if source == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(|e| ToolError::ReadError("stdin".into(), e))?;
        Ok(buf)
    } else {
        fs::read_to_string(source).map_err(|e| ToolError::ReadError(source.to_string(), e))
    }
}

pub fn read_json(source: &str) -> Result<Value, ToolError> {
    let text = read_input(source)?;
    Ok(serde_json::from_str(&text)?)
}
