use std::path::Path;
use vader3_pad::decoder::ReportLayout;
use vader3_pad::discovery::{GrabGuard, find_device};
use vader3_pad::gamepad_device::create_virtual_gamepad;
use vader3_pad::hidraw::HidrawReader;
use vader3_pad::logger::{self, Verbosity, log, log_detail};
use vader3_pad::session::Session;

const SYSFS_ROOT: &str = "/sys";
const DEV_ROOT: &str = "/dev";
const DEFAULT_VERBOSITY: Verbosity = Verbosity::Low;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init(DEFAULT_VERBOSITY);
    log(Verbosity::Low, &format!("Iniciando vader3-pad {}", env!("CARGO_PKG_VERSION")));

    let node = find_device(Path::new(SYSFS_ROOT), Path::new(DEV_ROOT))?;
    let layout = ReportLayout::vader3()?;

    let mut hidraw = HidrawReader::open(&node.hidraw)?;
    let mut gamepad = create_virtual_gamepad()?;
    let grab = GrabGuard::grab(&node.event_nodes);
    log_detail(
        Verbosity::Low,
        "✓ Gamepad virtual creado",
        &format!("{} nodos evdev ocultos", grab.len()),
    );

    let mut session = Session::new(layout);

    tokio::select! {
        result = session.run(&mut hidraw, &mut gamepad) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            log(Verbosity::Low, "Apagando vader3-pad...");
        }
    }

    // devolver los nodos reales antes de destruir el dispositivo virtual
    drop(grab);
    drop(gamepad);
    Ok(())
}
