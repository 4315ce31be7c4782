fn main() {
    if let Err(err) = blockwire::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
