use anyhow::{bail, Context, Result};
use pose_retarget::{
    GazeOutcome, IkGoal, Placement, PoseRetargeter, RetargetConfig, SkeletonRig, TickReport,
};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

const FRAME_TIME: f32 = 1.0 / 30.0;

struct Args {
    config: Option<PathBuf>,
    poses: PathBuf,
}

fn parse_args() -> Result<Args> {
    let mut config = None;
    let mut poses = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config needs a file argument")?;
                config = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                println!("usage: retarget-replay [--config FILE] POSES.jsonl");
                std::process::exit(0);
            }
            _ if poses.is_none() => poses = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument: {}", arg),
        }
    }

    let poses = poses.context("missing pose file (usage: retarget-replay [--config FILE] POSES.jsonl)")?;
    Ok(Args { config, poses })
}

/// Canvas messages share the stream with pose samples.
fn is_canvas_message(line: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(line)
        .map(|v| v.get("width").is_some() && v.get("nose").is_none())
        .unwrap_or(false)
}

fn describe(placement: &Placement) -> String {
    match placement {
        Placement::Committed(p) => format!("({:.3}, {:.3}, {:.3})", p.x, p.y, p.z),
        Placement::LowConfidence => "low-confidence".to_string(),
        Placement::Degenerate => "degenerate".to_string(),
    }
}

fn log_tick(frame: usize, report: &TickReport, rig: &SkeletonRig) {
    let Some(root) = report.root else {
        log::debug!("frame {}: waiting for a confident pose", frame);
        return;
    };

    let gaze = match report.gaze {
        GazeOutcome::Committed { target, x_ratio, deflected } => format!(
            "({:.3}, {:.3}, {:.3}) ratio {:.2}{}",
            target.x,
            target.y,
            target.z,
            x_ratio,
            if deflected { " deflected" } else { "" }
        ),
        GazeOutcome::Skipped => "held".to_string(),
    };
    log::info!("frame {}: root x {:.3}, gaze {}", frame, root.x, gaze);

    if let Some(arms) = &report.arms {
        for arm in arms {
            log::debug!(
                "frame {}: {:?} {} / {:?} {}",
                frame,
                arm.hint,
                describe(&arm.elbow),
                arm.goal,
                describe(&arm.hand)
            );
        }
    }

    let left = rig.arm(IkGoal::LeftHand);
    let right = rig.arm(IkGoal::RightHand);
    log::info!(
        "frame {}: hands L ({:.3}, {:.3}, {:.3}) R ({:.3}, {:.3}, {:.3})",
        frame,
        left.hand.x,
        left.hand.y,
        left.hand.z,
        right.hand.x,
        right.hand.y,
        right.hand.z
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => RetargetConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RetargetConfig::default(),
    };

    let file = File::open(&args.poses)
        .with_context(|| format!("opening pose file {}", args.poses.display()))?;

    let mut retargeter = PoseRetargeter::new(config);
    let mut rig = SkeletonRig::default();
    let mut frames = 0;
    let mut rejected = 0;

    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", line_no + 1))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if is_canvas_message(line) {
            if retargeter.set_canvas_size(line).is_err() {
                rejected += 1;
            }
            continue;
        }

        if retargeter.submit_pose(line).is_err() {
            rejected += 1;
        }

        let report = retargeter.update(&mut rig, FRAME_TIME);
        if !report.is_idle() {
            rig.solve();
        }
        log_tick(frames, &report, &rig);
        frames += 1;
    }

    log::info!(
        "replayed {} frames ({} unreadable), tracking: {}",
        frames,
        rejected,
        retargeter.is_tracking()
    );
    Ok(())
}
