use serde::{Deserialize, Serialize};

/// Entrada do relatório de usuários mais ativos. Não é persistido.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Critic {
    /// `$sortByCount` groups on the author email and returns it as `_id`.
    #[serde(rename = "_id")]
    pub email: String,
    #[serde(rename = "count")]
    pub num_comments: i64,
}
