use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_kenburns")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "kenburns.exe"
            } else {
                "kenburns"
            });
            p
        })
}

#[test]
fn cli_simulate_prints_one_json_line_per_frame() {
    let output = std::process::Command::new(exe())
        .args([
            "simulate",
            "--image",
            "600x800",
            "--image",
            "600x800",
            "--viewport",
            "300x400",
            "--seed",
            "3",
            "--duration-ms",
            "200",
            "--action",
            "start@0",
            "--action",
            "stop@100",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let frames: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    // t = 0, 16, .., 192, 200
    assert_eq!(frames.len(), 14);
    assert_eq!(frames[0]["t_ms"], 0);
    assert_eq!(frames[0]["image"], "600x800");
    assert_eq!(frames[0]["animating"], true);
    assert_eq!(frames.last().unwrap()["t_ms"], 200);
    assert_eq!(frames.last().unwrap()["animating"], false);
}

#[test]
fn cli_rejects_negative_durations() {
    let status = std::process::Command::new(exe())
        .args([
            "simulate",
            "--image",
            "600x800",
            "--viewport",
            "300x400",
            "--fade-in-ms",
            "-5",
        ])
        .output()
        .unwrap()
        .status;
    assert!(!status.success());
}

#[test]
fn cli_config_prints_defaults() {
    let output = std::process::Command::new(exe())
        .arg("config")
        .output()
        .unwrap();
    assert!(output.status.success());
    let cfg: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cfg["translate_ms_per_pixel"], 18);
    assert_eq!(cfg["fade_in_ms"], 250);
    assert_eq!(cfg["curve"], "Linear");
}

#[test]
fn cli_simulate_loads_config_and_replays_host_actions() {
    let config = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("kenburns_cli_config.json");
    std::fs::write(
        &config,
        r#"{ "start_delay_ms": 50, "fade_in_ms": 100, "fade_out_ms": 100, "translate_ms_per_pixel": 1 }"#,
    )
    .unwrap();

    // Images match the viewport, so every pan is empty and cycle lengths depend only on the
    // config: 50 ms for the first cycle, 50 + 100 + 60 ms for each fading one.
    let output = std::process::Command::new(exe())
        .args(["simulate", "--viewport", "0x0", "--seed", "9"])
        .args(["--image", "300x400", "--image", "300x400", "--image", "300x400"])
        .arg("--config")
        .arg(&config)
        .args(["--fade-in-ms", "60", "--frame-ms", "10", "--duration-ms", "1000"])
        .args(["--action", "start@0", "--action", "resize@200:300x400"])
        .args(["--action", "reset@600"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let frames: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(frames.len(), 101);
    let at = |t_ms: u64| {
        let frame = &frames[(t_ms / 10) as usize];
        assert_eq!(frame["t_ms"], t_ms);
        frame
    };
    let opacity = |t_ms: u64| at(t_ms)["opacity"].as_f64().unwrap();

    // Empty viewport: the start request waits for the resize.
    assert_eq!(at(190)["animating"], false);
    assert_eq!(at(200)["animating"], true);

    // Start delay from the file.
    assert_eq!(at(240)["index"], 0);
    assert_eq!(at(250)["index"], 1);

    // Fade-out from the file, fade-in from the flag.
    assert!((opacity(400) - 0.2).abs() < 1e-9);
    assert_eq!(at(450)["index"], 1);
    assert!(opacity(450) < 1.0);
    assert_eq!(at(460)["index"], 2);
    assert_eq!(opacity(460), 1.0);

    assert_eq!(at(590)["index"], 2);
    assert!(opacity(590) < 1.0);
    for t_ms in [600, 800, 1000] {
        let frame = at(t_ms);
        assert_eq!(frame["index"], 0);
        assert_eq!(frame["animating"], false);
        assert_eq!(frame["opacity"], 1.0);
        assert_eq!(frame["tx"], 0.0);
        assert_eq!(frame["ty"], 0.0);
    }
}
