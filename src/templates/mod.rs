//! Saved character templates
//!
//! A template is a named `CharacterDraft`. Instantiating one hands back a
//! copy of the draft; the roster assigns the new id when it is added.

pub mod preloaded;

pub use preloaded::{preloaded_templates, PreloadedNpc, PRELOADED_NPCS};

use crate::core::error::{ExchangeError, Result};
use crate::core::types::{CharacterKind, TemplateId};
use crate::entity::character::{Character, CharacterDraft};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTemplate {
    pub id: TemplateId,
    pub name: String,
    pub data: CharacterDraft,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SavedTemplate {
    pub fn new(name: impl Into<String>, data: CharacterDraft) -> Self {
        let now = Utc::now();
        Self {
            id: TemplateId::new(),
            name: name.into(),
            data,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn kind(&self) -> CharacterKind {
        self.data.kind()
    }
}

/// Ordered collection of saved templates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateLibrary {
    templates: Vec<SavedTemplate>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// A library holding only the preloaded NPCs
    pub fn with_preloaded() -> Self {
        let mut library = Self::new();
        library.merge_preloaded();
        library
    }

    pub fn templates(&self) -> &[SavedTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn save(&mut self, name: &str, draft: CharacterDraft) -> TemplateId {
        let template = SavedTemplate::new(name.trim(), draft);
        let id = template.id;
        info!(%id, name = %template.name, kind = %template.kind(), "template saved");
        self.templates.push(template);
        id
    }

    /// Save a character as it was created, not as it currently stands
    pub fn save_character(&mut self, name: &str, character: &Character) -> TemplateId {
        self.save(name, CharacterDraft::from_character(character))
    }

    /// Rename and/or replace the draft
    pub fn update(&mut self, id: TemplateId, name: Option<&str>, draft: Option<CharacterDraft>) -> Result<()> {
        let template = self
            .templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ExchangeError::TemplateNotFound(id))?;

        if let Some(name) = name {
            template.name = name.trim().to_string();
        }
        if let Some(draft) = draft {
            template.data = draft;
        }
        template.updated_at = Utc::now();
        debug!(%id, name = %template.name, "template updated");
        Ok(())
    }

    pub fn delete(&mut self, id: TemplateId) -> Result<SavedTemplate> {
        let index = self
            .templates
            .iter()
            .position(|t| t.id == id)
            .ok_or(ExchangeError::TemplateNotFound(id))?;
        let removed = self.templates.remove(index);
        info!(%id, name = %removed.name, "template deleted");
        Ok(removed)
    }

    pub fn get(&self, id: TemplateId) -> Option<&SavedTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Case-insensitive; the "NPC: " prefix of preloaded templates is optional
    pub fn find_by_name(&self, name: &str) -> Option<&SavedTemplate> {
        let name = name.trim();
        self.templates.iter().find(|t| {
            t.name.eq_ignore_ascii_case(name)
                || t.name
                    .strip_prefix(preloaded::TEMPLATE_PREFIX)
                    .is_some_and(|bare| bare.eq_ignore_ascii_case(name))
        })
    }

    pub fn pc_templates(&self) -> impl Iterator<Item = &SavedTemplate> + '_ {
        self.templates.iter().filter(|t| t.kind() == CharacterKind::Pc)
    }

    pub fn npc_templates(&self) -> impl Iterator<Item = &SavedTemplate> + '_ {
        self.templates.iter().filter(|t| t.kind() == CharacterKind::Npc)
    }

    /// A fresh draft from the template, ready for the roster
    pub fn instantiate(&self, id: TemplateId) -> Result<CharacterDraft> {
        self.get(id)
            .map(|t| t.data.clone())
            .ok_or(ExchangeError::TemplateNotFound(id))
    }

    /// Add every preloaded NPC whose template name is not already present.
    /// Returns how many were added.
    pub fn merge_preloaded(&mut self) -> usize {
        let existing: HashSet<String> = self.templates.iter().map(|t| t.name.clone()).collect();
        let missing: Vec<SavedTemplate> = preloaded_templates()
            .into_iter()
            .filter(|t| !existing.contains(&t.name))
            .collect();

        let added = missing.len();
        if added > 0 {
            info!(added, "adding preloaded NPC templates");
        }
        self.templates.extend(missing);
        added
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let library: Self = serde_json::from_str(json)?;
        for template in &library.templates {
            template.data.validate()?;
        }
        Ok(library)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ExchangeConfig;
    use crate::core::types::NpcTier;
    use crate::entity::conditions::ConditionType;

    #[test]
    fn test_save_get_delete() {
        let mut library = TemplateLibrary::new();
        let id = library.save("  Mai ", CharacterDraft::pc("Mai", "The Adamant"));
        assert_eq!(library.get(id).unwrap().name, "Mai");
        assert_eq!(library.pc_templates().count(), 1);
        assert_eq!(library.npc_templates().count(), 0);

        library.delete(id).unwrap();
        assert!(library.is_empty());
        assert!(matches!(library.delete(id), Err(ExchangeError::TemplateNotFound(_))));
    }

    #[test]
    fn test_update_bumps_timestamp() {
        let mut library = TemplateLibrary::new();
        let id = library.save("Ty Lee", CharacterDraft::pc("Ty Lee", "The Pillar"));
        let created = library.get(id).unwrap().created_at;

        library
            .update(id, Some("Ty Lee (acrobat)"), Some(CharacterDraft::pc("Ty Lee", "The Rogue")))
            .unwrap();

        let template = library.get(id).unwrap();
        assert_eq!(template.name, "Ty Lee (acrobat)");
        assert_eq!(template.created_at, created);
        assert!(template.updated_at >= created);
        assert!(library.update(TemplateId::new(), None, None).is_err());
    }

    #[test]
    fn test_save_character_uses_base_state() {
        let config = ExchangeConfig::default();
        let mut character = CharacterDraft::npc("Bandit", NpcTier::Moderate)
            .conditions(&[ConditionType::Angry])
            .build(&config);
        character.adjust_fatigue(2);
        character.toggle_condition(ConditionType::Angry);

        let mut library = TemplateLibrary::new();
        let id = library.save_character("Bandit", &character);
        let rebuilt = library.instantiate(id).unwrap().build(&config);

        assert_eq!(rebuilt.fatigue, 0);
        assert!(rebuilt.marked_conditions().next().is_none());
        assert_eq!(rebuilt.max_fatigue, 5);
        assert_ne!(rebuilt.id, character.id);
    }

    #[test]
    fn test_merge_preloaded_skips_existing_names() {
        let mut library = TemplateLibrary::new();
        library.save("NPC: Trader", CharacterDraft::npc("Trader", NpcTier::Moderate));

        let added = library.merge_preloaded();
        assert_eq!(added, PRELOADED_NPCS.len() - 1);
        assert_eq!(library.merge_preloaded(), 0);

        let trader = library.find_by_name("trader").unwrap();
        assert_eq!(trader.data.max_fatigue, None);
    }

    #[test]
    fn test_json_round_trip() {
        let library = TemplateLibrary::with_preloaded();
        let json = library.to_json().unwrap();
        assert!(json.trim_start().starts_with('['));
        assert!(json.contains("\"createdAt\""));

        let back = TemplateLibrary::from_json(&json).unwrap();
        assert_eq!(back, library);
    }

    #[test]
    fn test_from_json_rejects_invalid_draft() {
        let mut library = TemplateLibrary::new();
        library.save("Wisp", CharacterDraft::npc("Wisp", NpcTier::Minor));
        let mut value: serde_json::Value = serde_json::from_str(&library.to_json().unwrap()).unwrap();
        value[0]["data"]["maxFatigue"] = 0.into();

        assert!(matches!(
            TemplateLibrary::from_json(&value.to_string()),
            Err(ExchangeError::InvalidRecord(_))
        ));
    }
}
