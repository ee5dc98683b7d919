fn main() {
    if let Err(exit_code) = ckb_rosetta_bin::run_app(env!("CARGO_PKG_VERSION")) {
        ::std::process::exit(exit_code.into());
    }
}
