use serde::Serialize;

use crate::types::row::RowLocation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRow {
    #[serde(rename = "rid")]
    pub location: RowLocation,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinRow {
    pub left: String,
    pub right: String,
}

/// What a statement produced. Serialized flat into [`ExecResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Message {
        msg: String,
    },
    Inserted {
        msg: String,
        page: u32,
        slot: u16,
    },
    Rows {
        rows: Vec<QueryRow>,
    },
    Joined {
        rows: Vec<JoinRow>,
    },
    Updated {
        updated: usize,
    },
    Deleted {
        deleted: usize,
    },
}

impl Outcome {
    pub fn message(msg: impl Into<String>) -> Self {
        Outcome::Message { msg: msg.into() }
    }

    pub fn inserted(location: RowLocation) -> Self {
        Outcome::Inserted {
            msg: "inserted".to_string(),
            page: location.page_id,
            slot: location.slot_id,
        }
    }
}

/// Engine response: `{"ok":true,"rows":[...]}`, `{"ok":false,"msg":"..."}`
/// and so on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecResult {
    pub ok: bool,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl ExecResult {
    pub fn success(outcome: Outcome) -> Self {
        Self { ok: true, outcome }
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            outcome: Outcome::message(msg),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Message { msg } | Outcome::Inserted { msg, .. } => Some(msg.as_str()),
            _ => None,
        }
    }

    pub fn location(&self) -> Option<RowLocation> {
        match self.outcome {
            Outcome::Inserted { page, slot, .. } => Some(RowLocation::new(page, slot)),
            _ => None,
        }
    }

    pub fn rows(&self) -> &[QueryRow] {
        match &self.outcome {
            Outcome::Rows { rows } => rows.as_slice(),
            _ => &[],
        }
    }

    pub fn joined(&self) -> &[JoinRow] {
        match &self.outcome {
            Outcome::Joined { rows } => rows.as_slice(),
            _ => &[],
        }
    }

    /// Rows touched by an UPDATE or DELETE.
    pub fn count(&self) -> Option<usize> {
        match self.outcome {
            Outcome::Updated { updated } => Some(updated),
            Outcome::Deleted { deleted } => Some(deleted),
            _ => None,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!(r#"{{"ok":false,"msg":"unserializable result: {}"}}"#, e))
    }
}
