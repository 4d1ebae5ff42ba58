use std::sync::mpsc;

use scrubber_core::display::{resolve_display_frame, DisplayFrame};

use crate::messages::{WorkerCommand, WorkerResult};

/// Spawn the frame loader. Frames are fetched off the UI thread so slow
/// HTTP sources never stall scrolling.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("scrubber-loader".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn loader thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(mut cmd) = cmd_rx.recv() {
        // Only the newest request matters while the user keeps scrolling.
        while let Ok(newer) = cmd_rx.try_recv() {
            cmd = newer;
        }

        match cmd {
            WorkerCommand::LoadFrame {
                key,
                source,
                layout,
                frames,
            } => {
                let frame = resolve_display_frame(source.as_ref(), &layout, &frames, key.frame);
                if let DisplayFrame::Fallback(_) = frame {
                    tracing::warn!(sequence = %key.sequence, frame = key.frame, "render fallback");
                }
                send(&tx, &ctx, WorkerResult::Frame { key, frame });
            }
        }
    }
}
