//! Material configuration loader.
//!
//! Loads physical properties from YAML files, allowing a demo scene to
//! swap sphere densities, cloth stiffness, and contact response without
//! recompiling.
//!
//! ## Directory Structure
//!
//! ```text
//! materials/
//! ├── spheres/
//! │   └── steel.yaml
//! ├── cloths/
//! │   └── cotton.yaml
//! └── contacts/
//!     ├── rigid.yaml
//!     └── soft.yaml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{ClothMaterial, ContactProperties, SphereMaterial};

/// Error type for material loading operations.
#[derive(Debug)]
pub enum MaterialError {
    IoError(std::io::Error),
    ParseError(serde_yaml::Error),
    NotFound(String),
}

impl std::fmt::Display for MaterialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialError::IoError(e) => write!(f, "IO error: {}", e),
            MaterialError::ParseError(e) => write!(f, "YAML parse error: {}", e),
            MaterialError::NotFound(name) => write!(f, "Material not found: {}", name),
        }
    }
}

impl std::error::Error for MaterialError {}

impl From<std::io::Error> for MaterialError {
    fn from(err: std::io::Error) -> Self {
        MaterialError::IoError(err)
    }
}

impl From<serde_yaml::Error> for MaterialError {
    fn from(err: serde_yaml::Error) -> Self {
        MaterialError::ParseError(err)
    }
}

/// Material loader with configurable base directory.
pub struct MaterialLoader {
    base_path: PathBuf,
}

impl MaterialLoader {
    /// Create a new loader with the given base path.
    ///
    /// The base path should contain `spheres/`, `cloths/`, and `contacts/`
    /// subdirectories.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load a sphere material by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = MaterialLoader::new("materials");
    /// let steel = loader.load_sphere("steel")?;
    /// ```
    pub fn load_sphere(&self, name: &str) -> Result<SphereMaterial, MaterialError> {
        let path = self.base_path.join("spheres").join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(MaterialError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let props: SphereMaterial = serde_yaml::from_str(&contents)?;
        Ok(props)
    }

    /// Load a cloth material by name.
    pub fn load_cloth(&self, name: &str) -> Result<ClothMaterial, MaterialError> {
        let path = self.base_path.join("cloths").join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(MaterialError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let props: ClothMaterial = serde_yaml::from_str(&contents)?;
        Ok(props)
    }

    /// Load contact response properties by name.
    pub fn load_contact(&self, name: &str) -> Result<ContactProperties, MaterialError> {
        let path = self
            .base_path
            .join("contacts")
            .join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(MaterialError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let props: ContactProperties = serde_yaml::from_str(&contents)?;
        Ok(props)
    }

    /// List all available sphere materials.
    pub fn list_spheres(&self) -> Result<Vec<String>, MaterialError> {
        self.list_materials("spheres")
    }

    /// List all available cloth materials.
    pub fn list_cloths(&self) -> Result<Vec<String>, MaterialError> {
        self.list_materials("cloths")
    }

    /// List all available contact property sets.
    pub fn list_contacts(&self) -> Result<Vec<String>, MaterialError> {
        self.list_materials("contacts")
    }

    fn list_materials(&self, subdir: &str) -> Result<Vec<String>, MaterialError> {
        let path = self.base_path.join(subdir);
        if !path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if name.ends_with(".yaml") {
                names.push(name.trim_end_matches(".yaml").to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn get_materials_path() -> PathBuf {
        // Find the materials directory relative to the manifest
        let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(manifest_dir).join("..").join("materials")
    }

    #[test]
    fn test_load_existing_sphere_material() {
        let loader = MaterialLoader::new(get_materials_path());
        let result = loader.load_sphere("steel");

        assert!(result.is_ok(), "Should load steel: {:?}", result.err());
        let material = result.unwrap();
        assert_eq!(material.name, "Steel");
        assert!(material.density > 0.0);
    }

    #[test]
    fn test_load_nonexistent_material() {
        let loader = MaterialLoader::new(get_materials_path());
        let result = loader.load_sphere("nonexistent_material_xyz");

        assert!(result.is_err());
        match result {
            Err(MaterialError::NotFound(name)) => {
                assert_eq!(name, "nonexistent_material_xyz");
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_load_cloth_material() {
        let loader = MaterialLoader::new(get_materials_path());
        let result = loader.load_cloth("cotton");

        assert!(result.is_ok(), "Should load cotton: {:?}", result.err());
        let cloth = result.unwrap();
        assert!(cloth.particle_mass > 0.0);
        assert!(cloth.structural_stiffness > 0.0);
    }

    #[test]
    fn test_load_contact_properties() {
        let loader = MaterialLoader::new(get_materials_path());

        let rigid = loader.load_contact("rigid");
        assert!(rigid.is_ok(), "Should load rigid: {:?}", rigid.err());
        assert!((rigid.unwrap().restitution - 0.8).abs() < 1e-10);

        let soft = loader.load_contact("soft");
        assert!(soft.is_ok(), "Should load soft: {:?}", soft.err());
        assert_eq!(soft.unwrap().restitution, 0.0);
    }

    #[test]
    fn test_list_contacts() {
        let loader = MaterialLoader::new(get_materials_path());
        let result = loader.list_contacts();

        assert!(result.is_ok());
        let contacts = result.unwrap();
        assert!(contacts.contains(&"rigid".to_string()));
        assert!(contacts.contains(&"soft".to_string()));
    }
}
