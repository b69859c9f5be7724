//! Keybinding registry for operators and in-session actions.
//!
//! Bindings are kept in an ordered list so the preferences surface can show
//! them in a stable order. Lookup is by action name.

use crate::input::{InputEvent, InputKind, Modifiers};
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Toggle the horizontal-only constraint.
pub const CONSTRAINT_X: &str = "constraint_x";
/// Toggle the vertical-only constraint.
pub const CONSTRAINT_Y: &str = "constraint_y";
/// Mirror the image horizontally.
pub const FLIP_X: &str = "flip_x";
/// Mirror the image vertically.
pub const FLIP_Y: &str = "flip_y";

/// Keymap errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeymapError {
    #[error("No keybinding registered for action: {0}")]
    NotFound(String),
}

/// Result type for keymap operations.
pub type KeymapResult<T> = Result<T, KeymapError>;

/// Group a binding is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeymapSection {
    /// Shortcuts that start a session.
    Operators,
    /// Shortcuts used while a session runs.
    Modal,
}

/// A single action bound to a key and modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keybinding {
    pub action: String,
    pub label: String,
    pub key: InputKind,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
    pub section: KeymapSection,
}

impl Keybinding {
    /// Binding of a plain key without modifiers.
    pub fn new(action: &str, label: &str, key: InputKind, section: KeymapSection) -> Self {
        Self {
            action: action.to_string(),
            label: label.to_string(),
            key,
            alt: false,
            ctrl: false,
            shift: false,
            section,
        }
    }

    /// Set the required modifiers.
    pub fn with_modifiers(mut self, alt: bool, ctrl: bool, shift: bool) -> Self {
        self.alt = alt;
        self.ctrl = ctrl;
        self.shift = shift;
        self
    }

    /// Check an event against this binding.
    ///
    /// With `release` only the physical input is compared, since modifiers
    /// may have changed while the key was held.
    pub fn matches_event(&self, event: &InputEvent, release: bool) -> bool {
        let Some(input) = event.input() else {
            return false;
        };
        if *input != self.key {
            return false;
        }
        if release {
            return true;
        }
        let Modifiers {
            alt, ctrl, shift, ..
        } = event.modifiers();
        alt == self.alt && ctrl == self.ctrl && shift == self.shift
    }

    /// Format the binding for display (e.g., "Ctrl+Alt+G").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.alt {
            parts.push("Alt".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        parts.push(self.key.to_string());
        parts.join("+")
    }
}

/// Ordered registry of keybindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeymapRegistry {
    bindings: Vec<Keybinding>,
}

impl Default for KeymapRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl KeymapRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Registry pre-populated with the default bindings.
    pub fn with_defaults() -> Self {
        Self {
            bindings: default_bindings(),
        }
    }

    /// Append a binding, replacing any existing binding for the same action.
    pub fn register(&mut self, binding: Keybinding) {
        match self.bindings.iter_mut().find(|b| b.action == binding.action) {
            Some(existing) => *existing = binding,
            None => self.bindings.push(binding),
        }
    }

    /// Look up the binding of an action.
    pub fn resolve(&self, action: &str) -> KeymapResult<&Keybinding> {
        self.bindings
            .iter()
            .find(|b| b.action == action)
            .ok_or_else(|| KeymapError::NotFound(action.to_string()))
    }

    /// Check whether an event triggers the named action.
    ///
    /// An action that was never registered does not match anything.
    pub fn matches(&self, event: &InputEvent, action: &str, release: bool) -> bool {
        match self.resolve(action) {
            Ok(binding) => binding.matches_event(event, release),
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        }
    }

    /// Change the key and modifiers of an existing action.
    pub fn rebind(
        &mut self,
        action: &str,
        key: InputKind,
        alt: bool,
        ctrl: bool,
        shift: bool,
    ) -> KeymapResult<()> {
        let binding = self
            .bindings
            .iter_mut()
            .find(|b| b.action == action)
            .ok_or_else(|| KeymapError::NotFound(action.to_string()))?;
        log::debug!("Rebinding {} to {:?}", action, key);
        binding.key = key;
        binding.alt = alt;
        binding.ctrl = ctrl;
        binding.shift = shift;
        Ok(())
    }

    /// Add defaults for any action missing from this registry.
    pub fn merge_defaults(&mut self) {
        for binding in default_bindings() {
            if self.resolve(&binding.action).is_err() {
                log::info!("Adding missing default keybinding: {}", binding.action);
                self.bindings.push(binding);
            }
        }
    }

    /// The tool whose operator shortcut matches the event.
    pub fn operator_for(&self, event: &InputEvent) -> Option<ToolKind> {
        if !event.is_press() {
            return None;
        }
        ToolKind::ALL
            .into_iter()
            .find(|tool| self.matches(event, tool.action_name(), false))
    }

    /// All bindings in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Keybinding> {
        self.bindings.iter()
    }

    /// Bindings of one section in registration order.
    pub fn section(&self, section: KeymapSection) -> impl Iterator<Item = &Keybinding> {
        self.bindings.iter().filter(move |b| b.section == section)
    }

    /// Display string of an action's binding, or "?" if unbound.
    pub fn display(&self, action: &str) -> String {
        self.resolve(action)
            .map(Keybinding::format)
            .unwrap_or_else(|_| "?".to_string())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

fn default_bindings() -> Vec<Keybinding> {
    use KeymapSection::{Modal, Operators};

    vec![
        Keybinding::new(
            ToolKind::Scale.action_name(),
            ToolKind::Scale.label(),
            InputKind::key("S"),
            Operators,
        )
        .with_modifiers(true, true, false),
        Keybinding::new(
            ToolKind::Move.action_name(),
            ToolKind::Move.label(),
            InputKind::key("G"),
            Operators,
        )
        .with_modifiers(true, true, false),
        Keybinding::new(
            ToolKind::Rotate.action_name(),
            ToolKind::Rotate.label(),
            InputKind::key("R"),
            Operators,
        )
        .with_modifiers(true, true, false),
        Keybinding::new(CONSTRAINT_X, "Constraint X", InputKind::key("X"), Modal),
        Keybinding::new(CONSTRAINT_Y, "Constraint Y", InputKind::key("Y"), Modal),
        Keybinding::new(FLIP_X, "Flip Image X", InputKind::key("H"), Modal),
        Keybinding::new(FLIP_Y, "Flip Image Y", InputKind::key("V"), Modal),
    ]
}
