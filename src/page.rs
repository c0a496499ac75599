//! All upload controls on a page.
//!
//! The page owns one [`UploadComponent`] per file input found at startup and
//! hands out [`ComponentId`]s to address them. Components share the backend
//! and the notifier but never each other's state.

use crate::component::UploadComponent;
use crate::config::IntakeConfig;
use crate::file::SelectedFile;
use crate::imaging::ImageBackend;
use crate::notify::Notifier;
use crate::validation::ValidationResult;
use std::sync::Arc;

/// Index of a component within its [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(usize);

pub struct Page {
    config: IntakeConfig,
    backend: Arc<dyn ImageBackend>,
    notifier: Arc<dyn Notifier>,
    components: Vec<UploadComponent>,
}

impl Page {
    pub fn new(
        config: IntakeConfig,
        backend: Arc<dyn ImageBackend>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            backend,
            notifier,
            components: Vec::new(),
        }
    }

    /// Bind a new component to the file input called `input_name`.
    pub fn attach(&mut self, input_name: &str) -> ComponentId {
        let id = ComponentId(self.components.len());
        self.components.push(UploadComponent::new(
            input_name,
            self.config.upload.clone(),
            self.config.preview.clone(),
            Arc::clone(&self.backend),
            Arc::clone(&self.notifier),
        ));
        tracing::debug!(input = input_name, id = id.0, "upload control attached");
        id
    }

    /// Attach one component per input, in order.
    pub fn attach_all<'a>(&mut self, input_names: impl IntoIterator<Item = &'a str>) -> Vec<ComponentId> {
        input_names
            .into_iter()
            .map(|name| self.attach(name))
            .collect()
    }

    pub fn find(&self, input_name: &str) -> Option<ComponentId> {
        self.components
            .iter()
            .position(|c| c.name() == input_name)
            .map(ComponentId)
    }

    pub fn component(&self, id: ComponentId) -> Option<&UploadComponent> {
        self.components.get(id.0)
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut UploadComponent> {
        self.components.get_mut(id.0)
    }

    /// Route a picker selection. `None` for an unknown id or empty selection.
    pub fn select(&mut self, id: ComponentId, files: Vec<SelectedFile>) -> Option<ValidationResult> {
        self.component_mut(id)?.select(files)
    }

    /// Route a drop. `None` for an unknown id or a drop without files.
    pub fn drop_files(
        &mut self,
        id: ComponentId,
        files: Vec<SelectedFile>,
    ) -> Option<ValidationResult> {
        self.component_mut(id)?.drop_files(files)
    }

    /// Apply whatever decode results have arrived, for every component.
    pub fn pump(&mut self) -> usize {
        self.components.iter_mut().map(|c| c.pump()).sum()
    }

    /// Block until no component has a decode in flight.
    pub fn wait_idle(&mut self) {
        for component in &mut self.components {
            component.wait_idle();
        }
    }

    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &UploadComponent)> {
        self.components
            .iter()
            .enumerate()
            .map(|(i, c)| (ComponentId(i), c))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }
}
