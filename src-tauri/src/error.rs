use serde::Serialize;

/// All errors surfaced by the party-hub commands.
#[derive(Debug, thiserror::Error)]
pub enum PaveraError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("El Bartender no ha configurado su teléfono")]
    MissingHostPhone,

    #[error("Espera {0}s antes de pedir otra canción")]
    CooldownActive(u64),

    #[error("{0}")]
    EmptyInput(String),

    #[error("Invalid navigation: {0}")]
    InvalidNavigation(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("{0}")]
    Custom(String),
}

// Tauri requires error types to implement Serialize for IPC transport.
impl Serialize for PaveraError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PaveraError>;
