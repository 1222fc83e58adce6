//! Command routing over a mirrored repository

use super::test_utils::{MirrorFixture, MANAGEMENT_URL};
use patchtree::cli::{Commands, RunContext};
use patchtree::config::{PatchTreeConfig, RelayConfig};
use patchtree::error::ApiError;

fn context(fixture: &MirrorFixture) -> RunContext {
    let config = PatchTreeConfig {
        relay: RelayConfig {
            management_url: MANAGEMENT_URL.to_string(),
            ..RelayConfig::default()
        },
        ..PatchTreeConfig::default()
    };
    RunContext::with_config(config, Some(fixture.path().to_path_buf()))
}

#[tokio::test]
async fn test_size_of_location() {
    let fixture = MirrorFixture::new();
    let output = context(&fixture)
        .execute(&Commands::Size {
            set: "game".to_string(),
            path: vec!["data/win32".to_string()],
        })
        .await
        .unwrap();
    assert_eq!(output, "data/win32: 105B (105 bytes)");
}

#[tokio::test]
async fn test_ls_json_lists_one_level() {
    let fixture = MirrorFixture::new();
    let output = context(&fixture)
        .execute(&Commands::Ls {
            set: "launcher".to_string(),
            path: vec!["launcher".to_string()],
            format: "json".to_string(),
        })
        .await
        .unwrap();
    let rows: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(rows[0]["name"], "bin");
    assert_eq!(rows[0]["kind"], "directory");
    assert_eq!(rows[0]["size"], 2048);
    assert_eq!(rows[1]["name"], "readme.txt.pat");
    assert_eq!(rows[1]["fingerprint"], "AAAA");
}

#[tokio::test]
async fn test_routes_over_all_sets() {
    let fixture = MirrorFixture::new();
    let output = context(&fixture)
        .execute(&Commands::Routes {
            set: "all".to_string(),
        })
        .await
        .unwrap();
    let routes: Vec<&str> = output.lines().collect();
    assert_eq!(routes[0], "launcher");
    assert!(routes.contains(&"launcher/launcher/bin"));
    assert!(routes.contains(&"game/data/win32reboot/00"));
}

#[tokio::test]
async fn test_all_tolerates_one_failing_set() {
    let fixture = MirrorFixture::new();
    fixture.overwrite("patch/patchlist_classic.txt", "only-one-field\n");
    let output = context(&fixture)
        .execute(&Commands::Size {
            set: "all".to_string(),
            path: vec![],
        })
        .await
        .unwrap();
    assert_eq!(output, "/: 2.01KB (2060 bytes)");
}

#[tokio::test]
async fn test_show_prints_text_and_summarises_binaries() {
    let fixture = MirrorFixture::new();
    let context = context(&fixture);

    let text = context
        .execute(&Commands::Show {
            path: "launcher/readme.txt.pat".to_string(),
            set: "launcher".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(text, "hello from the launcher");

    let summary = context
        .execute(&Commands::Show {
            path: "data/win32/0001".to_string(),
            set: "game".to_string(),
        })
        .await
        .unwrap();
    assert!(summary.contains("Fetched: 12 bytes"));
    assert!(summary.contains("download only"));

    let missing = context
        .execute(&Commands::Show {
            path: "launcher/none.txt.pat".to_string(),
            set: "launcher".to_string(),
        })
        .await;
    assert!(matches!(missing, Err(ApiError::Content(_))));
}
