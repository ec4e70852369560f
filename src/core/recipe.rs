//! Recipe descriptor access.
//!
//! The descriptor is a read-only collaborator. The only value extracted from
//! it is the declared package name, and failing to find one is the single
//! fatal condition in identity resolution.

use std::path::Path;

use crate::defaults;
use crate::error::{Error, Result};
use crate::utils::{io, parser};

/// Extract the declared package name from the recipe descriptor.
pub fn package_name(recipe_dir: &Path) -> Result<String> {
    let path = recipe_dir.join(defaults::RECIPE_FILE);
    let content = io::read_file(&path, "read recipe descriptor")?;
    parser::extract_first(&content, defaults::RECIPE_NAME_PATTERN)
        .ok_or_else(|| Error::recipe_name_not_found(path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::fs;
    use tempfile::tempdir;

    fn write_recipe(dir: &Path, content: &str) {
        fs::write(dir.join("conanfile.py"), content).unwrap();
    }

    #[test]
    fn extracts_double_quoted_name() {
        let dir = tempdir().unwrap();
        write_recipe(
            dir.path(),
            "class AlgorithmConan(ConanFile):\n    name = \"algorithm\"\n    url = \"x\"\n",
        );
        assert_eq!(package_name(dir.path()).unwrap(), "algorithm");
    }

    #[test]
    fn extracts_single_quoted_name() {
        let dir = tempdir().unwrap();
        write_recipe(dir.path(), "name = 'tao-algo'\n");
        assert_eq!(package_name(dir.path()).unwrap(), "tao-algo");
    }

    #[test]
    fn missing_name_is_fatal() {
        let dir = tempdir().unwrap();
        write_recipe(dir.path(), "class X(ConanFile):\n    url = \"x\"\n");
        let err = package_name(dir.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::RecipeNameNotFound);
    }

    #[test]
    fn missing_descriptor_is_fatal() {
        let dir = tempdir().unwrap();
        let err = package_name(dir.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalIoError);
    }
}
