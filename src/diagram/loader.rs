//! Load a diagram from the editor's JSON, either raw or wrapped in the request payload.

use crate::diagram::Diagram;
use crate::error::DiagramError;
use serde::{Deserialize, Serialize};

/// Parse diagram text as exported by the editor (`model.toJson()`).
pub fn parse_diagram(text: &str) -> Result<Diagram, DiagramError> {
    let diagram: Diagram = serde_json::from_str(text)?;
    tracing::debug!(
        nodes = diagram.node_data_array.len(),
        links = diagram.link_data_array.len(),
        "diagram parsed"
    );
    Ok(diagram)
}

/// `diagramData` is either the JSON text the editor sends or an inline object.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiagramData {
    Text(String),
    Inline(serde_json::Value),
}

/// Body of a generation request.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramPayload {
    pub diagram_data: DiagramData,
}

impl DiagramPayload {
    pub fn into_diagram(self) -> Result<Diagram, DiagramError> {
        match self.diagram_data {
            DiagramData::Text(text) => parse_diagram(&text),
            DiagramData::Inline(value) => Ok(serde_json::from_value(value)?),
        }
    }
}

/// Accept either a bare diagram or a request body wrapping one in `diagramData`.
pub fn parse_document(text: &str) -> Result<Diagram, DiagramError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if value.get("diagramData").is_some() {
        let payload: DiagramPayload = serde_json::from_value(value)?;
        payload.into_diagram()
    } else {
        let diagram: Diagram = serde_json::from_value(value)?;
        Ok(diagram)
    }
}
