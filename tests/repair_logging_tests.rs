//! Substitutions made by the legality repair are reported at trace level.

use elevator_ga::moves::Move;
use elevator_ga::repair::{LegalityRepair, PathRepair};
use log::{LevelFilter, Log, Metadata, Record};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Mutex;

struct RecordingLogger {
    messages: Mutex<Vec<String>>,
}

impl Log for RecordingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("{}", record.args()));
    }

    fn flush(&self) {}
}

static LOGGER: RecordingLogger = RecordingLogger {
    messages: Mutex::new(Vec::new()),
};

fn take_messages() -> Vec<String> {
    std::mem::take(&mut *LOGGER.messages.lock().unwrap())
}

#[test]
fn test_legality_repair_traces_substitutions() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    // A legal path is returned untouched and logs nothing.
    let legal = [Move::Doors, Move::Up, Move::Doors];
    take_messages();
    LegalityRepair.repair(&legal, 5, Move::Idle, 10, &mut rng);
    assert!(take_messages().is_empty());

    // Doors twice in a row: the second gene is illegal after doors.
    LegalityRepair.repair(&[Move::Doors, Move::Doors], 5, Move::Idle, 10, &mut rng);
    let messages = take_messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("legality repair at gene 1:"));
    assert!(messages[0].contains("illegal after"));

    // Going down from the ground floor.
    LegalityRepair.repair(&[Move::Down], 0, Move::Idle, 10, &mut rng);
    let messages = take_messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("legality repair at gene 0:"));
    assert!(messages[0].ends_with("(leaves floor 0)"));
}
