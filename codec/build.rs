use std::fmt::Write;
use std::path::PathBuf;
use std::{env, fs};

/// (name, default) pairs. Each one can be overridden with `NRF_SER_<name>` at build time.
static CONFIGS: &[(&str, usize)] = &[
    // Largest frame payload, packet type byte excluded.
    ("MAX_PACKET_SIZE", 384),
    // Depth of the application side event queue.
    ("EVENT_QUEUE_SIZE", 4),
];

fn main() {
    let mut data = String::new();

    for (name, default) in CONFIGS {
        let key = format!("NRF_SER_{name}");
        println!("cargo:rerun-if-env-changed={key}");

        let value = match env::var(&key) {
            Ok(value) => value
                .parse::<usize>()
                .unwrap_or_else(|_| panic!("{key} must be an unsigned integer, got {value:?}")),
            Err(_) => *default,
        };
        writeln!(data, "pub const {name}: usize = {value};").unwrap();
    }

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    fs::write(out_dir.join("config.rs"), data).unwrap();
}
