use lazyworktree::utils::path::{absolutize, app_data_dir_from, expand_env, expand_path, normalize};
use std::path::{Path, PathBuf};

#[test]
fn test_tilde_expands_to_home() {
    let home = dirs::home_dir().unwrap();
    assert_eq!(expand_path("~").unwrap(), home.to_string_lossy());
    assert_eq!(
        PathBuf::from(expand_path("~/worktrees").unwrap()),
        home.join("worktrees")
    );
}

#[test]
fn test_env_expansion_uses_lookup() {
    let lookup = |name: &str| (name == "ROOT").then(|| "/srv".to_string());
    assert_eq!(expand_env("$ROOT/wt/${ROOT}", lookup), "/srv/wt//srv");
    assert_eq!(expand_env("${ROOT", lookup), "${ROOT");
}

#[test]
fn test_data_dir_resolution() {
    assert_eq!(
        app_data_dir_from(Some("/data".into()), None),
        PathBuf::from("/data/lazyworktree")
    );
    assert_eq!(
        app_data_dir_from(None, Some(PathBuf::from("/home/me"))),
        PathBuf::from("/home/me/.local/share/lazyworktree")
    );
}

#[test]
fn test_absolutize_does_not_touch_disk() {
    let path = absolutize(Path::new("/definitely/missing/../file")).unwrap();
    assert_eq!(path, PathBuf::from("/definitely/file"));
    assert_eq!(normalize(Path::new("a/../../b")), PathBuf::from("../b"));
}
