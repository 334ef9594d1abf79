use std::fs;

use scriptpack_docs::{sync_readme, SECTION_END, SECTION_START};

#[test]
fn test_sync_readme_keeps_surrounding_content() {
    let tmp = tempfile::tempdir().unwrap();
    let scripts = tmp.path().join("bash_scripts");
    fs::create_dir_all(&scripts).unwrap();
    fs::write(scripts.join("deploy.sh"), "#!/bin/bash\n# desc: Deploy the app\n").unwrap();
    fs::write(scripts.join("empty.sh"), "").unwrap();
    fs::write(scripts.join("plain.sh"), "#!/bin/bash\necho hi\n").unwrap();

    let readme = tmp.path().join("README.md");
    let before = "# Demo\n\nSome intro.\n";
    let after = "\n## License\n\nMIT\n";
    fs::write(
        &readme,
        format!("{}{}\nstale\n{}{}", before, SECTION_START, SECTION_END, after),
    )
    .unwrap();

    assert!(sync_readme(&scripts, &readme).unwrap());
    let content = fs::read_to_string(&readme).unwrap();

    assert!(content.starts_with(before));
    assert!(content.ends_with(after));
    assert!(!content.contains("stale"));
    assert!(content.contains("| `deploy.sh` | Deploy the app |"));
    assert!(content.contains("| `empty.sh` | Empty script file |"));
    assert!(content.contains("| `plain.sh` | Shell script utility |"));

    // second run is a no-op
    assert!(!sync_readme(&scripts, &readme).unwrap());
    assert_eq!(fs::read_to_string(&readme).unwrap(), content);
}

#[test]
fn test_sync_readme_picks_up_new_scripts() {
    let tmp = tempfile::tempdir().unwrap();
    let scripts = tmp.path().join("bash_scripts");
    fs::create_dir_all(&scripts).unwrap();
    fs::write(scripts.join("a.sh"), "# desc: A\n").unwrap();
    let readme = tmp.path().join("README.md");

    assert!(sync_readme(&scripts, &readme).unwrap());
    fs::write(scripts.join("b.sh"), "# desc: B\n").unwrap();
    assert!(sync_readme(&scripts, &readme).unwrap());

    let content = fs::read_to_string(&readme).unwrap();
    assert_eq!(content.matches(SECTION_START).count(), 1);
    assert!(content.contains("| `b.sh` | B |"));
}
