//! Integration tests for `rigup configure`

mod common;

use common::TestProject;
use predicates::prelude::*;

const CORS_MANIFEST: &str = r#"stubsRoot: ./stubs
configure:
  - publishStub:
      stub: config.stub
  - updateRcFile:
      providers: ['@acme/cors/cors_provider']
"#;

const CORS_STUB: &str = "{{{\nexports({ to: app.configPath('cors.ts') })\n}}}\nexport default { enabled: true }\n";

fn cors_project() -> TestProject {
    let project = TestProject::with_rc_file();
    project.write_file("packages/cors/setup.yaml", CORS_MANIFEST);
    project.write_file("packages/cors/stubs/config.stub", CORS_STUB);
    project
}

#[test]
fn test_unknown_package_fails() {
    let project = TestProject::new();
    project
        .rigup_cmd()
        .args(["configure", "./dummy-pkg"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot find module"));
}

#[test]
fn test_missing_stubs_root_fails() {
    let project = TestProject::new();
    project.write_file("dummy-pkg.yaml", "configure: []\n");

    project
        .rigup_cmd()
        .args(["configure", "./dummy-pkg.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Missing \"stubsRoot\" export from \"./dummy-pkg.yaml\" package",
        ));
}

#[test]
fn test_package_without_configure_warns() {
    let project = TestProject::new();
    project.write_file("dummy-pkg.yaml", "stubsRoot: ./\n");

    project
        .rigup_cmd()
        .args(["configure", "./dummy-pkg.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Cannot configure \"./dummy-pkg.yaml\" package. The package does not export the configure hook",
        ));
}

#[test]
fn test_empty_manifest_changes_nothing() {
    let project = TestProject::with_rc_file();
    project.write_file("packages/empty/setup.yaml", "");

    project
        .rigup_cmd()
        .args(["configure", "./packages/empty"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Cannot configure \"./packages/empty\" package",
        ))
        .stderr(predicate::str::is_empty());

    assert_eq!(project.read_file("adonisrc.ts"), common::RC_FILE);
    assert!(!project.file_exists("config"));
}

#[test]
fn test_publish_stub_and_update_rc_file() {
    let project = cors_project();

    project
        .rigup_cmd()
        .args(["configure", "./packages/cors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DONE:    create config/cors.ts"))
        .stdout(predicate::str::contains("DONE:    update adonisrc.ts file"));

    assert_eq!(
        project.read_file("config/cors.ts"),
        "export default { enabled: true }\n"
    );
    assert!(
        project
            .read_file("adonisrc.ts")
            .contains("providers: [() => import('@acme/cors/cors_provider')]")
    );
}

#[test]
fn test_existing_file_is_skipped() {
    let project = cors_project();
    project.write_file("config/cors.ts", "// mine\n");

    project
        .rigup_cmd()
        .args(["configure", "./packages/cors"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "SKIPPED: create config/cors.ts (File already exists)",
        ));

    assert_eq!(project.read_file("config/cors.ts"), "// mine\n");
}

#[test]
fn test_force_overwrites_existing_file() {
    let project = cors_project();
    project.write_file("config/cors.ts", "// mine\n");

    project
        .rigup_cmd()
        .args(["configure", "./packages/cors", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DONE:    create config/cors.ts"));

    assert_eq!(
        project.read_file("config/cors.ts"),
        "export default { enabled: true }\n"
    );
}

#[test]
fn test_second_run_leaves_rc_file_alone() {
    let project = cors_project();

    project
        .rigup_cmd()
        .args(["configure", "./packages/cors"])
        .assert()
        .success();
    let first = project.read_file("adonisrc.ts");

    project
        .rigup_cmd()
        .args(["configure", "./packages/cors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("update adonisrc.ts file").not());

    assert_eq!(project.read_file("adonisrc.ts"), first);
}

#[test]
fn test_project_flag_overrides_current_directory() {
    let project = cors_project();
    let elsewhere = TestProject::new();

    elsewhere
        .rigup_cmd()
        .arg("--project")
        .arg(&project.path)
        .args(["configure", "./packages/cors"])
        .assert()
        .success();

    assert!(project.file_exists("config/cors.ts"));
    assert!(!elsewhere.file_exists("config/cors.ts"));
}

#[test]
fn test_package_from_node_modules() {
    let project = TestProject::with_rc_file();
    project.write_file(
        "node_modules/@acme/session/setup.yaml",
        "stubsRoot: stubs\nconfigure:\n  - publishStub:\n      stub: session.stub\n",
    );
    project.write_file(
        "node_modules/@acme/session/stubs/session.stub",
        "{{{ exports({ to: app.configPath('session.ts') }) }}}\nexport default { driver: 'cookie' }\n",
    );

    project
        .rigup_cmd()
        .args(["configure", "@acme/session"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DONE:    create config/session.ts"));
}

#[test]
fn test_builtin_vinejs() {
    let project = TestProject::with_rc_file();

    project
        .rigup_cmd()
        .args(["configure", "vinejs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DONE:    update adonisrc.ts file"));

    assert!(
        project
            .read_file("adonisrc.ts")
            .contains("() => import('@adonisjs/core/providers/vinejs_provider')")
    );
}

#[test]
fn test_builtin_edge() {
    let project = TestProject::with_rc_file();

    project
        .rigup_cmd()
        .args(["configure", "edge"])
        .assert()
        .success();

    let rc = project.read_file("adonisrc.ts");
    assert!(rc.contains("() => import('@adonisjs/core/providers/edge_provider')"));
    assert!(rc.contains("pattern: 'resources/views/**/*.edge'"));
    assert!(rc.contains("reloadServer: false"));
}

#[test]
fn test_builtin_without_rc_file_fails() {
    let project = TestProject::new();

    project
        .rigup_cmd()
        .args(["configure", "vinejs"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Runtime configuration file not found"));
}

#[test]
fn test_entity_data_drives_destination() {
    let project = TestProject::with_rc_file();
    project.write_file(
        "packages/auth/setup.yaml",
        r#"stubsRoot: ./stubs
configure:
  - publishStub:
      stub: provider.stub
      data:
        entity: auth/session_guard
"#,
    );
    project.write_file(
        "packages/auth/stubs/provider.stub",
        "{{{\nexports({ to: app.providersPath(entity.path, string.snakeCase(entity.name) + '_provider.ts') })\n}}}\nexport default class {{ entity.name | pascal_case }}Provider {}\n",
    );

    project
        .rigup_cmd()
        .args(["configure", "./packages/auth"])
        .assert()
        .success();

    assert_eq!(
        project.read_file("providers/auth/session_guard_provider.ts"),
        "export default class SessionGuardProvider {}\n"
    );
}

#[test]
fn test_no_install_prints_listing() {
    let project = TestProject::with_rc_file();
    project.write_file(
        "packages/odd/setup.yaml",
        r#"stubsRoot: ./
configure:
  - installPackages:
      - name: is-odd@2.0.0
        isDevDependency: true
      - name: is-even@1.0.0
"#,
    );

    project
        .rigup_cmd()
        .args(["configure", "./packages/odd", "--no-install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Please install following packages"))
        .stdout(predicate::str::contains("npm i -D is-odd@2.0.0"))
        .stdout(predicate::str::contains("yarn add is-even@1.0.0"))
        .stdout(predicate::str::contains("pnpm add -D is-odd@2.0.0"));
}

#[test]
fn test_list_packages_step() {
    let project = TestProject::with_rc_file();
    project.write_file(
        "packages/odd/setup.yaml",
        "stubsRoot: ./\nconfigure:\n  - listPackages:\n      - name: is-odd@2.0.0\n",
    );

    project
        .rigup_cmd()
        .args(["configure", "./packages/odd"])
        .assert()
        .success()
        .stdout(predicate::str::contains("npm i is-odd@2.0.0"));
}

#[cfg(unix)]
mod dependency_manager {
    use super::*;

    const INSTALL_MANIFEST: &str = r#"stubsRoot: ./
configure:
  - installPackages:
      - name: is-odd@2.0.0
        isDevDependency: true
      - name: is-even@1.0.0
"#;

    fn path_with(bin: &std::path::Path) -> String {
        format!("{}:/usr/bin:/bin", bin.display())
    }

    #[test]
    fn test_install_with_npm() {
        let project = TestProject::with_rc_file();
        project.write_file("packages/odd/setup.yaml", INSTALL_MANIFEST);
        let bin = project.write_script("bin/npm", "echo \"npm $@\" >> calls.txt");

        project
            .rigup_cmd()
            .env("PATH", path_with(&bin))
            .args(["configure", "./packages/odd"])
            .assert()
            .success();

        assert_eq!(
            project.read_file("calls.txt"),
            "npm install -D is-odd@2.0.0\nnpm install is-even@1.0.0\n"
        );
    }

    #[test]
    fn test_install_with_pnpm_lockfile() {
        let project = TestProject::with_rc_file();
        project.write_file("pnpm-lock.yaml", "lockfileVersion: '9.0'\n");
        project.write_file("packages/odd/setup.yaml", INSTALL_MANIFEST);
        let bin = project.write_script("bin/pnpm", "echo \"pnpm $@\" >> calls.txt");

        project
            .rigup_cmd()
            .env("PATH", path_with(&bin))
            .args(["configure", "./packages/odd"])
            .assert()
            .success();

        assert_eq!(
            project.read_file("calls.txt"),
            "pnpm add -D is-odd@2.0.0\npnpm add is-even@1.0.0\n"
        );
    }

    #[test]
    fn test_install_failure_exits_with_error() {
        let project = TestProject::with_rc_file();
        project.write_file("packages/odd/setup.yaml", INSTALL_MANIFEST);
        let bin = project.write_script(
            "bin/npm",
            "echo \"npm $@\" >> calls.txt\necho 'npm ERR! notarget' >&2\nexit 1",
        );

        project
            .rigup_cmd()
            .env("PATH", path_with(&bin))
            .args(["configure", "./packages/odd"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "Command failed with exit code 1: npm install -D is-odd@2.0.0",
            ))
            .stderr(predicate::str::contains("npm ERR! notarget"));

        assert_eq!(project.read_file("calls.txt"), "npm install -D is-odd@2.0.0\n");
    }

    #[test]
    fn test_install_timeout() {
        let project = TestProject::with_rc_file();
        project.write_file("packages/odd/setup.yaml", INSTALL_MANIFEST);
        let bin = project.write_script("bin/npm", "sleep 5");

        project
            .rigup_cmd()
            .env("PATH", path_with(&bin))
            .args(["configure", "./packages/odd", "--install-timeout", "1"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Command timed out after 1s"));
    }
}
