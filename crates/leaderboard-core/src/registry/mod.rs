//! Static registry of models, attacks and table cells.
//!
//! A [`Registry`] is assembled once through [`RegistryBuilder`], which
//! checks the id invariants, and is read-only afterwards. Display-name
//! lookups go through maps built at construction time.

pub mod builtin;
pub mod table;

use std::collections::{HashMap, HashSet};

use crate::domain::{Attack, CellSpec, Model, ModelGroup, RegistryError};
use crate::resolve::policy_static::data_key;

pub use builtin::builtin;
pub use table::{Table, TableRow};

/// Immutable leaderboard definition.
#[derive(Debug, Clone)]
pub struct Registry {
    groups: Vec<ModelGroup>,
    attacks: Vec<Attack>,
    table: Table,
    model_names: HashMap<String, String>,
    attack_names: HashMap<String, String>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Model groups in display order.
    pub fn models(&self) -> &[ModelGroup] {
        &self.groups
    }

    /// Attacks in column order.
    pub fn attacks(&self) -> &[Attack] {
        &self.attacks
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn model(&self, id: &str) -> Option<&Model> {
        self.groups
            .iter()
            .flat_map(|g| g.models.iter())
            .find(|m| m.id == id)
    }

    pub fn attack(&self, id: &str) -> Option<&Attack> {
        self.attacks.iter().find(|a| a.id == id)
    }

    pub fn cell(&self, model_id: &str, attack_id: &str) -> Option<&CellSpec> {
        self.table.cell(model_id, attack_id)
    }

    /// Display string of a model, or `id` itself when unknown.
    pub fn model_display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.model_names.get(id).map(String::as_str).unwrap_or(id)
    }

    /// Display string of an attack, or `id` itself when unknown.
    pub fn attack_display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.attack_names.get(id).map(String::as_str).unwrap_or(id)
    }
}

/// Collects registry contents and validates them in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    groups: Vec<ModelGroup>,
    attacks: Vec<Attack>,
    rows: Vec<TableRow>,
}

impl RegistryBuilder {
    pub fn group(mut self, name: impl Into<String>, models: Vec<Model>) -> Self {
        self.groups.push(ModelGroup::new(name, models));
        self
    }

    pub fn attack(mut self, attack: Attack) -> Self {
        self.attacks.push(attack);
        self
    }

    pub fn attacks(mut self, attacks: impl IntoIterator<Item = Attack>) -> Self {
        self.attacks.extend(attacks);
        self
    }

    pub fn row(mut self, row: TableRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Validate and freeze.
    ///
    /// Fails on duplicate model, attack, row or cell ids, on distinct ids
    /// that map to the same data file key, and on table entries naming an
    /// unregistered model or attack.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let mut model_names = HashMap::new();
        for model in self.groups.iter().flat_map(|g| g.models.iter()) {
            if model_names
                .insert(model.id.clone(), model.display_str.clone())
                .is_some()
            {
                return Err(RegistryError::DuplicateModel(model.id.clone()));
            }
        }

        let mut attack_names = HashMap::new();
        for attack in &self.attacks {
            if attack_names
                .insert(attack.id.clone(), attack.display_str.clone())
                .is_some()
            {
                return Err(RegistryError::DuplicateAttack(attack.id.clone()));
            }
        }

        check_data_keys(self.groups.iter().flat_map(|g| g.models.iter().map(|m| &m.id)))?;
        check_data_keys(self.attacks.iter().map(|a| &a.id))?;

        let mut seen_rows = HashSet::new();
        for row in &self.rows {
            if !model_names.contains_key(&row.model_id) {
                return Err(RegistryError::UnknownModel(row.model_id.clone()));
            }
            if !seen_rows.insert(row.model_id.as_str()) {
                return Err(RegistryError::DuplicateRow(row.model_id.clone()));
            }

            let mut seen_cells = HashSet::new();
            for (attack_id, _) in &row.cells {
                if !attack_names.contains_key(attack_id) {
                    return Err(RegistryError::UnknownAttack {
                        model_id: row.model_id.clone(),
                        attack_id: attack_id.clone(),
                    });
                }
                if !seen_cells.insert(attack_id.as_str()) {
                    return Err(RegistryError::DuplicateCell {
                        model_id: row.model_id.clone(),
                        attack_id: attack_id.clone(),
                    });
                }
            }
        }

        Ok(Registry {
            groups: self.groups,
            attacks: self.attacks,
            table: Table::from_rows(self.rows),
            model_names,
            attack_names,
        })
    }
}

fn check_data_keys<'a>(ids: impl Iterator<Item = &'a String>) -> Result<(), RegistryError> {
    let mut keys: HashMap<String, &String> = HashMap::new();
    for id in ids {
        let key = data_key(id);
        if let Some(first) = keys.get(&key) {
            return Err(RegistryError::DataKeyCollision {
                first: (*first).clone(),
                second: id.clone(),
                key,
            });
        }
        keys.insert(key, id);
    }
    Ok(())
}
