use thiserror::Error;

use crate::core::types::{CharacterId, CharacterKind, TemplateId};

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Roster full: at most {cap} {kind} characters allowed")]
    RosterFull { kind: CharacterKind, cap: usize },

    #[error("Stance roll {0} is outside 2..=12")]
    StanceOutOfRange(i64),

    #[error("Unknown technique: {0}")]
    UnknownTechnique(String),

    #[error("Technique selection rejected: {0}")]
    SelectionRejected(#[from] SelectionRejection),

    #[error("Operation not applicable: {0}")]
    NotApplicable(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(TemplateId),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Why the selection gate refused a technique
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionRejection {
    #[error("no stance has been rolled this exchange")]
    NoStance,

    #[error("basic/mastered limit reached ({limit})")]
    BasicMasteredLimit { limit: u32 },

    #[error("learned or practiced techniques need a full stance")]
    LearnedPracticedNotAllowed,

    #[error("{technique} cannot be used with the current approach")]
    ApproachIncompatible { technique: String },

    #[error("{technique} requires {training} training")]
    TrainingMissing { technique: String, training: String },

    #[error("{technique} is not one of this character's techniques")]
    NotAvailable { technique: String },

    #[error("technique limit reached ({limit})")]
    TechniqueLimit { limit: u32 },

    #[error("{technique} is already selected")]
    AlreadySelected { technique: String },
}

pub type Result<T> = std::result::Result<T, ExchangeError>;
