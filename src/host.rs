//! Mount points that widgets attach their surfaces to.

use std::collections::BTreeMap;

/// In-process registry of named containers.
///
/// A widget refuses to construct unless its mount point exists here, and
/// records its surface id under that mount point so the surface can be
/// found again by id.
#[derive(Debug, Clone, Default)]
pub struct Host {
    mount_points: BTreeMap<String, Vec<String>>,
}

impl Host {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container. Adding an existing mount point keeps its surfaces.
    pub fn add_mount_point(&mut self, id: impl Into<String>) {
        self.mount_points.entry(id.into()).or_default();
    }

    pub fn has_mount_point(&self, id: &str) -> bool {
        self.mount_points.contains_key(id)
    }

    /// Surface ids attached under `mount_point`, in attach order.
    pub fn surfaces(&self, mount_point: &str) -> Option<&[String]> {
        self.mount_points.get(mount_point).map(Vec::as_slice)
    }

    /// Mount point holding the surface tagged `surface_id`.
    pub fn find_surface(&self, surface_id: &str) -> Option<&str> {
        self.mount_points
            .iter()
            .find(|(_, surfaces)| surfaces.iter().any(|s| s == surface_id))
            .map(|(mount, _)| mount.as_str())
    }

    /// Returns false when the mount point does not exist.
    pub(crate) fn attach(&mut self, mount_point: &str, surface_id: &str) -> bool {
        match self.mount_points.get_mut(mount_point) {
            Some(surfaces) => {
                surfaces.push(surface_id.to_string());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_and_find() {
        let mut host = Host::new();
        host.add_mount_point("sidebar");
        assert!(host.attach("sidebar", "upload"));
        assert!(host.attach("sidebar", "download"));
        assert_eq!(
            host.surfaces("sidebar").unwrap(),
            &["upload".to_string(), "download".to_string()]
        );
        assert_eq!(host.find_surface("download"), Some("sidebar"));
        assert_eq!(host.find_surface("missing"), None);
    }

    #[test]
    fn test_attach_to_missing_mount_point() {
        let mut host = Host::new();
        assert!(!host.attach("nowhere", "ring"));
        assert!(!host.has_mount_point("nowhere"));
        assert!(host.surfaces("nowhere").is_none());
    }

    #[test]
    fn test_re_adding_mount_point_keeps_surfaces() {
        let mut host = Host::new();
        host.add_mount_point("main");
        host.attach("main", "ring");
        host.add_mount_point("main");
        assert_eq!(host.surfaces("main").unwrap().len(), 1);
    }
}
