use anyhow::Result;
use std::time::{Duration, Instant};

use avatar_tracker::config::Config;
use avatar_tracker::controller::{anchor_markers, AvatarController, TrackingMode};
use avatar_tracker::pose::{FrameInput, Pose};
use avatar_tracker::vmt::VmtClient;

const CONFIG_PATH: &str = "config.toml";

/// 合成モーション: 半径1.5mの円周を歩きながら腕を振る
fn synthetic_input(t: f32) -> FrameInput {
    let radius = 1.5;
    let angular_speed = 0.5; // rad/s
    let angle = t * angular_speed;

    // 円周上の位置と進行方向（接線）のヨー
    let x = radius * angle.cos();
    let z = radius * angle.sin();
    let yaw = f32::atan2(-angle.sin(), angle.cos());
    let half = yaw / 2.0;
    let facing = [0.0, half.sin(), 0.0, half.cos()];

    // 頭: 歩行の上下動つき
    let head_y = 1.7 + 0.02 * (t * 6.0).sin();
    let head = Pose::new([x, head_y, z], facing);

    // 手: 体の前で逆位相に振る
    let swing = 0.3 * (t * 3.0).sin();
    let left_hand = Pose::new([x - 0.25, 1.1 + swing.max(0.0), z + 0.3], facing);
    let right_hand = Pose::new([x + 0.25, 1.1 + (-swing).max(0.0), z + 0.3], facing);

    FrameInput {
        head: Some(head),
        left_hand: Some(left_hand),
        right_hand: Some(right_hand),
        height_reference: Some(head),
    }
}

fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);

    println!("=== Avatar Tracker Demo ({}) ===", env!("GIT_VERSION"));
    println!("VMT target: {}", config.vmt.addr);
    println!("Target FPS: {}", config.app.target_fps);
    println!(
        "Mode: {}",
        match config.controller.mode {
            TrackingMode::FullBody => "full_body",
            TrackingMode::HalfBody => "half_body",
        }
    );
    println!(
        "Player height: {}m, turn smoothness: {}",
        config.controller.player_height, config.controller.turn_smoothness
    );
    println!();
    println!("合成モーションで駆動中... [Ctrl-C] 終了");
    println!();

    let mut controller = AvatarController::from_config(&config.controller);
    let vmt = VmtClient::new(&config.vmt.addr)?;
    println!("VMT client ready (scale={:.3})", controller.root().scale);

    let frame_duration = Duration::from_secs_f64(1.0 / config.app.target_fps as f64);
    let start = Instant::now();
    let mut last_frame = Instant::now();
    let mut last_report = Instant::now();

    loop {
        let loop_start = Instant::now();
        let dt = loop_start.duration_since(last_frame).as_secs_f32();
        last_frame = loop_start;

        let input = synthetic_input(start.elapsed().as_secs_f32());
        controller.update(&input, dt);

        vmt.send_anchors(controller.anchors())?;
        if controller.mode() == TrackingMode::FullBody {
            vmt.send_root(controller.root())?;
        }

        // 1秒ごとに状態を表示
        if last_report.elapsed() >= Duration::from_secs(1) {
            let root = controller.root();
            println!(
                "root=({:+.2}, {:+.2}, {:+.2})  speed={:.2}m/s  markers={}",
                root.position[0],
                root.position[1],
                root.position[2],
                controller.speed(),
                anchor_markers(controller.anchors()).len()
            );
            last_report = Instant::now();
        }

        let elapsed = loop_start.elapsed();
        if elapsed < frame_duration {
            std::thread::sleep(frame_duration - elapsed);
        }
    }
}
