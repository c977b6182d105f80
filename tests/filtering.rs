// tests/filtering.rs

mod common;

use assert_cmd::prelude::*;
use common::{cmd, create_file};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_filter_with_cli_properties() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    create_file(
        temp.path(),
        "src/README.txt",
        "Welcome to ${project.name} ${project.version}, built by @user@.\n",
    )?;

    cmd()
        .args(["src", "-o", "out", "-F", "-e", "UTF-8"])
        .args(["--project-name", "Demo", "--project-version", "1.2.3"])
        .args(["-D", "user=ci"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 transformed"));

    assert_eq!(
        fs::read_to_string(temp.path().join("out/README.txt"))?,
        "Welcome to Demo 1.2.3, built by ci.\n"
    );

    temp.close()?;
    Ok(())
}

#[test]
fn test_filter_file_and_property_precedence() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    create_file(
        temp.path(),
        "filters/build.properties",
        "# build filter\nenv.name = staging\nhost: db.${env.name}.local\n",
    )?;
    create_file(temp.path(), "src/app.conf", "name=${env.name}\nhost=${host}\n")?;

    cmd()
        .args(["src", "-o", "out", "-F", "-e", "UTF-8"])
        .args(["-f", "filters/build.properties"])
        .args(["-D", "env.name=prod"])
        .current_dir(temp.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("out/app.conf"))?,
        "name=prod\nhost=db.prod.local\n"
    );

    temp.close()?;
    Ok(())
}

#[test]
fn test_unresolved_and_escaped_expressions() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    create_file(
        temp.path(),
        "src/run.sh",
        "echo ${known} ${unknown} \\${known} user@example.com\n",
    )?;

    cmd()
        .args(["src", "-o", "out", "-F", "-e", "UTF-8", "--escape-string", "\\"])
        .args(["-D", "known=yes"])
        .current_dir(temp.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("out/run.sh"))?,
        "echo yes ${unknown} ${known} user@example.com\n"
    );

    temp.close()?;
    Ok(())
}

#[test]
fn test_custom_delimiter_only() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    create_file(temp.path(), "src/page.html", "<p>#{title}</p><p>${title}</p>\n")?;

    cmd()
        .arg("src")
        .args(["--delimiter", "#{*}"])
        .args(["-o", "out", "-F", "-e", "UTF-8", "-D", "title=Home"])
        .current_dir(temp.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("out/page.html"))?,
        "<p>Home</p><p>${title}</p>\n"
    );

    temp.close()?;
    Ok(())
}

#[test]
fn test_property_files_are_latin1() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    // "café" in ISO-8859-1, followed by an expression.
    create_file(temp.path(), "src/messages.properties", b"label=caf\xe9 ${suffix}\n")?;
    create_file(temp.path(), "src/notes.txt", "caf\u{e9} ${suffix}\n")?;

    cmd()
        .args(["src", "-o", "out", "-F", "-e", "UTF-8", "-D", "suffix=\u{e9}t\u{e9}"])
        .current_dir(temp.path())
        .assert()
        .success();

    assert_eq!(
        fs::read(temp.path().join("out/messages.properties"))?,
        b"label=caf\xe9 \xe9t\xe9\n"
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("out/notes.txt"))?,
        "caf\u{e9} \u{e9}t\u{e9}\n"
    );

    temp.close()?;
    Ok(())
}

#[test]
fn test_windows_path_values_are_escaped() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    create_file(temp.path(), "src/a.cfg", "dir=${dir}\n")?;
    create_file(temp.path(), "src/b.properties", "dir=${plain}\n")?;

    cmd()
        .args(["src", "-o", "out", "-F", "-e", "UTF-8"])
        .args(["-D", r"dir=C:\tools\bin", "-D", r"plain=a\b"])
        .current_dir(temp.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("out/a.cfg"))?,
        "dir=C:\\\\tools\\\\bin\n"
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("out/b.properties"))?,
        "dir=a\\\\b\n"
    );

    fs::remove_dir_all(temp.path().join("out"))?;
    cmd()
        .args(["src", "-o", "out", "-F", "-e", "UTF-8", "--no-escape-windows-paths"])
        .args(["-D", r"dir=C:\tools\bin", "-D", r"plain=a\b"])
        .current_dir(temp.path())
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("out/a.cfg"))?,
        "dir=C:\\tools\\bin\n"
    );

    temp.close()?;
    Ok(())
}

#[test]
fn test_non_filtered_extension_is_copied_verbatim() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    create_file(temp.path(), "src/template.tpl", "${keep.me}\r\n")?;
    create_file(temp.path(), "src/other.txt", "${keep.me}\r\n")?;

    cmd()
        .arg("src")
        .args(["-x", ".tpl"])
        .args(["-o", "out", "-F", "-e", "UTF-8", "-l", "unix", "-D", "keep.me=gone"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 transformed, 1 unchanged"));

    assert_eq!(
        fs::read(temp.path().join("out/template.tpl"))?,
        b"${keep.me}\r\n"
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("out/other.txt"))?,
        "gone\n"
    );

    temp.close()?;
    Ok(())
}

#[test]
fn test_missing_encoding_warns() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    create_file(temp.path(), "src/a.txt", "${v}")?;

    cmd()
        .args(["src", "-o", "out", "-F", "-D", "v=1"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("File encoding has not been set"));

    assert_eq!(fs::read_to_string(temp.path().join("out/a.txt"))?, "1");

    temp.close()?;
    Ok(())
}
