fn main() {
    if let Err(err) = roster_diff::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
