//! Operations on the graph aggregate
//!
//! Module membership only ever changes through [`Graph::attach_file`] and
//! [`Graph::detach_file`], so the "no empty modules" invariant is enforced
//! in one place instead of being scattered across the builder and differ.

use std::collections::BTreeMap;

use crate::model::{FileEntry, Graph, Module};

impl Graph {
    /// Insert or replace a file entry and register it with its module,
    /// creating the module on first use. If the file previously belonged to
    /// a different module it is moved, and the old module is dropped once
    /// its member list empties.
    pub fn attach_file(&mut self, path: String, entry: FileEntry) {
        if let Some(existing) = self.files.get(&path) {
            if existing.module != entry.module {
                let old_module = existing.module.clone();
                self.strip_member(&old_module, &path);
            }
        }

        let module = self.modules.entry(entry.module.clone()).or_default();
        if !module.files.contains(&path) {
            module.files.push(path.clone());
            module.files.sort();
        }
        self.files.insert(path, entry);
    }

    /// Remove a file entry and its module membership. The owning module is
    /// dropped once its member list empties.
    pub fn detach_file(&mut self, path: &str) -> Option<FileEntry> {
        let entry = self.files.remove(path)?;
        self.strip_member(&entry.module, path);
        Some(entry)
    }

    fn strip_member(&mut self, module_name: &str, path: &str) {
        if let Some(module) = self.modules.get_mut(module_name) {
            module.files.retain(|f| f != path);
            if module.files.is_empty() {
                self.modules.remove(module_name);
            }
        }
    }

    /// Recompute every summary counter from the current `files` map.
    pub fn recompute_summary(&mut self) {
        let mut total_files = 0u32;
        let mut total_functions = 0u32;
        let mut total_classes = 0u32;
        let mut languages: BTreeMap<String, u32> = BTreeMap::new();
        let mut entry_points: Vec<String> = Vec::new();

        for (path, entry) in &self.files {
            total_files += 1;
            total_functions += entry.functions.len() as u32;
            total_classes += entry.classes.len() as u32;
            *languages.entry(entry.language.as_str().to_string()).or_insert(0) += 1;
            if entry.is_entry_point {
                entry_points.push(path.clone());
            }
        }

        self.summary.total_files = total_files;
        self.summary.total_functions = total_functions;
        self.summary.total_classes = total_classes;
        self.summary.modules = self.modules.keys().cloned().collect();
        self.summary.entry_points = entry_points;
        self.config.languages = languages.keys().cloned().collect();
        self.summary.languages = languages;
    }

    /// Look up a module by name.
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }
}
