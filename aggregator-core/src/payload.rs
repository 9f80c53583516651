//! Button payload codec: the colon-delimited strings stored in inline
//! buttons and received back on press.
//!
//! Wire format: `show:<uuid>`, `del:<uuid>`, `edit:<uuid>:<field>`.
//! `encode` and `parse` must round-trip exactly; a payload that fails to
//! parse is a defect in upstream data and the event carrying it is dropped.

use thiserror::Error;
use uuid::Uuid;

use crate::types::ArticleField;

/// Decoded inline-button payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPayload {
    /// Present the article.
    Show(Uuid),
    /// Delete the article (admin only).
    Delete(Uuid),
    /// Start an edit of one field (admin only).
    Edit(Uuid, ArticleField),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Empty payload")]
    Empty,
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("Missing segment in payload: {0}")]
    MissingSegment(String),
    #[error("Malformed article id: {0}")]
    BadArticleId(String),
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

impl ButtonPayload {
    /// Encodes into the wire string a button is built with.
    pub fn encode(&self) -> String {
        match self {
            ButtonPayload::Show(id) => format!("show:{id}"),
            ButtonPayload::Delete(id) => format!("del:{id}"),
            ButtonPayload::Edit(id, field) => format!("edit:{id}:{field}"),
        }
    }

    /// Parses a wire string received on a button press.
    pub fn parse(raw: &str) -> Result<Self, PayloadError> {
        let mut segments = raw.split(':');
        let action = segments.next().filter(|s| !s.is_empty()).ok_or(PayloadError::Empty)?;
        let id = segments
            .next()
            .ok_or_else(|| PayloadError::MissingSegment(raw.to_string()))?;
        let id: Uuid = id
            .parse()
            .map_err(|_| PayloadError::BadArticleId(id.to_string()))?;

        match action {
            "show" => Ok(ButtonPayload::Show(id)),
            "del" => Ok(ButtonPayload::Delete(id)),
            "edit" => {
                let field = segments
                    .next()
                    .ok_or_else(|| PayloadError::MissingSegment(raw.to_string()))?;
                let field = ArticleField::parse(field)
                    .ok_or_else(|| PayloadError::UnknownField(field.to_string()))?;
                Ok(ButtonPayload::Edit(id, field))
            }
            other => Err(PayloadError::UnknownAction(other.to_string())),
        }
    }
}
