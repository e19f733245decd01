use anyhow::{Context, Result};
use clap::Parser;
use std::net::TcpListener;
use tracing_subscriber::EnvFilter;

use shutterlag::cli::{AnalyzeArgs, Cli, CommandKind, MeasureArgs};
use shutterlag::device::{AdbDeviceController, DeviceController};
use shutterlag::injector::{CommandKeyInjector, NullInjector};
use shutterlag::lag::{LagCalculator, LagFixture, OcrSample};
use shutterlag::report::LagReport;
use shutterlag::schedule::Schedule;
use shutterlag::session::MeasurementSession;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    let default_level = if debug {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Run one full measurement session: bind, prepare the device, accept a
/// connection, drive the handshake, and optionally correlate OCR samples
fn run_measure(args: &MeasureArgs) -> Result<()> {
    let config = args.session_config();
    config.validate()?;

    let listener =
        TcpListener::bind("127.0.0.1:0").context("failed to bind an ephemeral port")?;
    let port = listener.local_addr()?.port();
    println!("Listening on 127.0.0.1:{port}");

    if args.no_device {
        tracing::info!("--no-device set, skipping app launch and port forwarding");
    } else {
        // Fire-and-forget: failures are logged and the run continues,
        // since the device may already be prepared by hand
        let controller = AdbDeviceController::new(config.adb_path.as_str());
        controller.launch_app(port);
        controller.forward_port(port);
    }

    let (stream, peer) = listener.accept().context("failed to accept connection")?;
    println!("Got connection from {peer}");

    let schedule = if args.dry_run {
        MeasurementSession::new(&config, NullInjector).run(stream)?
    } else {
        let injector = CommandKeyInjector::new(config.injector_command.clone());
        MeasurementSession::new(&config, injector).run(stream)?
    };
    println!(
        "Transmitted {} timestamps for {} key presses",
        schedule.len(),
        schedule.len() - 1
    );

    if let Some(ocr_path) = &args.ocr {
        let contents = std::fs::read_to_string(ocr_path)
            .with_context(|| format!("failed to read OCR samples: {}", ocr_path.display()))?;
        let samples: Vec<OcrSample> = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse OCR samples: {}", ocr_path.display()))?;
        let report = correlate(&config.key_symbol, config.camera_startup_delay_ms, &schedule, &samples);
        print!("{}", report.render(args.format)?);
    }

    Ok(())
}

/// Compute the lag report for a completed schedule against OCR samples
fn correlate(
    key_symbol: &str,
    camera_startup_delay_ms: i64,
    schedule: &Schedule,
    samples: &[OcrSample],
) -> LagReport {
    let calculator = LagCalculator::new(key_symbol);
    let lag = calculator.compute_lag(
        samples,
        schedule.start_timestamp().unwrap_or_default(),
        &schedule.key_press_timestamps(),
        camera_startup_delay_ms,
    );
    LagReport::new(key_symbol, camera_startup_delay_ms, lag)
}

/// Compute lag offline from a stored fixture
fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let fixture = LagFixture::load(&args.fixture)?;
    let calculator = LagCalculator::new(fixture.key_symbol.as_str());
    let lag = calculator.compute_lag(
        &fixture.ocr_data,
        fixture.test_start_timestamp,
        &fixture.key_press_timestamp,
        fixture.camera_startup_delay,
    );

    let report = LagReport::new(
        fixture.key_symbol.as_str(),
        fixture.camera_startup_delay,
        lag.clone(),
    );
    print!("{}", report.render(args.format)?);

    if args.check && lag != fixture.expected_lag {
        anyhow::bail!(
            "computed lag does not match expectedLag: got {:?}, want {:?}",
            lag,
            fixture.expected_lag
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    match &args.command {
        CommandKind::Measure(measure) => run_measure(measure),
        CommandKind::Analyze(analyze) => run_analyze(analyze),
    }
}
