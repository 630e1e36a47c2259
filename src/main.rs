fn main() {
    if let Err(err) = hubflow::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
