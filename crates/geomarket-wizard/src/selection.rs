//! Selected scenes, unique by id, in the order they were picked.

use geomarket_core::models::{Scene, SceneId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Scene>", into = "Vec<Scene>")]
pub struct SceneSelection {
    scenes: Vec<Scene>,
}

impl SceneSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the scene if selected, append it otherwise.
    ///
    /// Returns whether the scene is selected afterwards.
    pub fn toggle(&mut self, scene: Scene) -> bool {
        if self.remove(&scene.id).is_some() {
            false
        } else {
            self.scenes.push(scene);
            true
        }
    }

    /// Append unless a scene with the same id is already selected
    pub fn insert(&mut self, scene: Scene) -> bool {
        if self.contains(&scene.id) {
            return false;
        }
        self.scenes.push(scene);
        true
    }

    pub fn remove(&mut self, scene_id: &str) -> Option<Scene> {
        let index = self.scenes.iter().position(|s| s.id == scene_id)?;
        Some(self.scenes.remove(index))
    }

    pub fn contains(&self, scene_id: &str) -> bool {
        self.scenes.iter().any(|s| s.id == scene_id)
    }

    pub fn ids(&self) -> Vec<SceneId> {
        self.scenes.iter().map(|s| s.id.clone()).collect()
    }

    /// Distinct collections of the selected scenes, first-seen order
    pub fn collections(&self) -> Vec<&str> {
        let mut collections: Vec<&str> = Vec::new();
        for scene in &self.scenes {
            if !collections.contains(&scene.collection.as_str()) {
                collections.push(&scene.collection);
            }
        }
        collections
    }

    pub fn clear(&mut self) {
        self.scenes.clear();
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter()
    }
}

impl From<Vec<Scene>> for SceneSelection {
    fn from(scenes: Vec<Scene>) -> Self {
        let mut selection = Self::new();
        for scene in scenes {
            selection.insert(scene);
        }
        selection
    }
}

impl From<SceneSelection> for Vec<Scene> {
    fn from(selection: SceneSelection) -> Self {
        selection.scenes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(id: &str) -> Scene {
        Scene::new(id, "sentinel-2-l2a")
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let mut selection = SceneSelection::from(vec![scene("A"), scene("B")]);
        let before = selection.clone();

        assert!(selection.toggle(scene("C")));
        assert!(!selection.toggle(scene("C")));
        assert_eq!(selection, before);
    }

    #[test]
    fn test_toggle_matches_by_id_not_position() {
        let mut selection = SceneSelection::from(vec![scene("A"), scene("B"), scene("C")]);
        assert!(!selection.toggle(scene("B")));
        assert_eq!(selection.ids(), vec!["A", "C"]);
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut selection = SceneSelection::new();
        assert!(selection.insert(scene("A")));
        assert!(!selection.insert(scene("A")));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_from_vec_dedups_keeping_first() {
        let selection = SceneSelection::from(vec![scene("A"), scene("B"), scene("A")]);
        assert_eq!(selection.ids(), vec!["A", "B"]);
    }

    #[test]
    fn test_collections_distinct() {
        let selection = SceneSelection::from(vec![
            Scene::new("A", "sentinel-1-grd"),
            Scene::new("B", "sentinel-2-l2a"),
            Scene::new("C", "sentinel-1-grd"),
        ]);
        assert_eq!(selection.collections(), vec!["sentinel-1-grd", "sentinel-2-l2a"]);
    }
}
