use ckb_rosetta_app_config::{export_bundled_config, ExitCode, InitArgs, CONFIG_FILE_NAME};

pub fn init(args: InitArgs) -> Result<(), ExitCode> {
    export_bundled_config(&args.root_dir, args.force)?;
    println!(
        "Initialized CKB Rosetta config in {}",
        args.root_dir.join(CONFIG_FILE_NAME).display()
    );
    println!("Review the [network] and [node] sections before `ckb-rosetta run`.");
    Ok(())
}
