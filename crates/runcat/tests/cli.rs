use std::process::Command;

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_runcat"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute runcat");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("CPU load"));
    assert!(stdout.contains("autostart"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_runcat"));
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute runcat");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("runcat"));
}

#[test]
fn autostart_requires_a_subcommand() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_runcat"));
    cmd.arg("autostart");

    // Act
    let output = cmd.output().expect("failed to execute runcat");

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("enable"));
}
