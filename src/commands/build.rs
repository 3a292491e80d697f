use anyhow::{Result, bail};
use log::debug;
use std::path::{Path, PathBuf};

use crate::{
    driver,
    recipe::{self, Recipe},
    runtime::{Runtime, is_path_under},
    settings::Settings,
    toolchain::CmakeTool,
};

use super::manifest_path;

/// Run one packaging build from a recipe manifest.
#[tracing::instrument(skip(runtime, recipe_path))]
pub fn build<R: Runtime + 'static>(runtime: R, recipe_path: Option<PathBuf>) -> Result<()> {
    let manifest = manifest_path(recipe_path);
    let recipe = Recipe::load(&runtime, &manifest)?;

    let settings = Settings::resolve(&runtime);
    let bound = settings.for_axes(recipe.settings())?;
    debug!("Bound settings: {:?}", bound);

    let source_dir = recipe::manifest_dir(&runtime, &manifest)?;
    let build_dir = select_build_dir(&runtime, &recipe, &source_dir)?;
    debug!("Source dir {:?}, build dir {:?}", source_dir, build_dir);
    runtime.create_dir_all(&build_dir)?;

    let definitions = cache_definitions(&bound);

    println!("   packaging {} {}", recipe.name(), recipe.version());
    let tool = match recipe.generator() {
        "cmake" => CmakeTool::new(runtime, source_dir, build_dir, definitions),
        other => bail!("Unsupported generator '{}'", other),
    };
    driver::build_package(&recipe, &tool)?;

    println!("    packaged {} {}", recipe.name(), recipe.version());
    Ok(())
}

/// Pick the build directory. With `no_copy_source` the build must not
/// touch the source tree, so it goes to a per-package directory outside
/// of it; otherwise `build/` under the source tree is used.
fn select_build_dir<R: Runtime>(
    runtime: &R,
    recipe: &Recipe,
    source_dir: &Path,
) -> Result<PathBuf> {
    if !recipe.no_copy_source() {
        return Ok(source_dir.join("build"));
    }

    let build_dir = runtime
        .temp_dir()
        .join(format!("{}-{}-build", recipe.name(), recipe.version()));
    if is_path_under(&build_dir, source_dir) {
        bail!(
            "Build directory {:?} would land inside the source tree {:?}",
            build_dir,
            source_dir
        );
    }
    Ok(build_dir)
}

/// Map bound settings axes to CMake cache definitions. Only `build_type`
/// has a cache counterpart; the other axes describe the host and are
/// carried for diagnostics.
fn cache_definitions(bound: &[(String, String)]) -> Vec<(String, String)> {
    bound
        .iter()
        .filter_map(|(axis, value)| match axis.as_str() {
            "build_type" => Some(("CMAKE_BUILD_TYPE".to_string(), value.clone())),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use crate::test_utils::{configure_mock_runtime_basics, sample_recipe, sample_recipe_json, test_workdir};
    use mockall::predicate::eq;

    #[test]
    fn test_build_happy_path_runs_three_cmake_phases() {
        let mut runtime = MockRuntime::new();
        configure_mock_runtime_basics(&mut runtime);

        let manifest = test_workdir().join("recipe.json");
        runtime
            .expect_read_to_string()
            .with(eq(manifest.clone()))
            .returning(|_| Ok(sample_recipe_json()));

        let build_dir = PathBuf::from("/tmp/crank/quickgraph-0.10.0-build");
        runtime
            .expect_create_dir_all()
            .with(eq(build_dir.clone()))
            .times(1)
            .returning(|_| Ok(()));

        let mut seq = mockall::Sequence::new();
        for expected in ["-S", "--build", "--install"] {
            runtime
                .expect_run()
                .withf(move |program, args, _| program == "cmake" && args[0] == expected)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _, _| Ok(()));
        }

        build(runtime, Some(manifest)).unwrap();
    }

    #[test]
    fn test_build_configure_failure_stops_the_run() {
        let mut runtime = MockRuntime::new();
        configure_mock_runtime_basics(&mut runtime);

        let manifest = test_workdir().join("recipe.json");
        runtime
            .expect_read_to_string()
            .returning(|_| Ok(sample_recipe_json()));
        runtime.expect_create_dir_all().returning(|_| Ok(()));

        runtime
            .expect_run()
            .withf(|program, args, _| program == "cmake" && args[0] == "-S")
            .times(1)
            .returning(|_, _, _| Err(anyhow::anyhow!("'cmake' exited with status 1")));
        // No further expect_run: build and install must not execute

        let result = build(runtime, Some(manifest));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("'cmake' exited with status 1")
        );
    }

    #[test]
    fn test_build_rejects_unsupported_generator() {
        let mut runtime = MockRuntime::new();
        configure_mock_runtime_basics(&mut runtime);

        let manifest = test_workdir().join("recipe.json");
        let json = sample_recipe_json().replace("\"cmake\"", "\"meson\"");
        runtime
            .expect_read_to_string()
            .returning(move |_| Ok(json.clone()));
        runtime.expect_create_dir_all().returning(|_| Ok(()));

        let result = build(runtime, Some(manifest));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Unsupported generator 'meson'")
        );
    }

    #[test]
    fn test_select_build_dir_in_source_when_copy_allowed() {
        let runtime = MockRuntime::new();
        let json = sample_recipe_json().replace(
            "\"no_copy_source\": true",
            "\"no_copy_source\": false",
        );
        let recipe: Recipe = serde_json::from_str(&json).unwrap();

        let dir = select_build_dir(&runtime, &recipe, &test_workdir()).unwrap();
        assert_eq!(dir, test_workdir().join("build"));
    }

    #[test]
    fn test_select_build_dir_out_of_source() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_temp_dir()
            .returning(|| PathBuf::from("/tmp/crank"));

        let recipe = sample_recipe();
        let dir = select_build_dir(&runtime, &recipe, &test_workdir()).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/crank/quickgraph-0.10.0-build"));
    }

    #[test]
    fn test_select_build_dir_refuses_source_tree() {
        let mut runtime = MockRuntime::new();
        let source = test_workdir();
        let nested = source.join("tmp");
        runtime.expect_temp_dir().return_const(nested);

        let recipe = sample_recipe();
        let result = select_build_dir(&runtime, &recipe, &source);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("inside the source tree")
        );
    }

    #[test]
    fn test_cache_definitions_maps_build_type_only() {
        let bound = vec![
            ("os".to_string(), "linux".to_string()),
            ("build_type".to_string(), "Debug".to_string()),
            ("arch".to_string(), "x86_64".to_string()),
        ];
        let defs = cache_definitions(&bound);
        assert_eq!(defs, vec![("CMAKE_BUILD_TYPE".to_string(), "Debug".to_string())]);
    }
}
