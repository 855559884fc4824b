use std::path::{Path, PathBuf};

// Embeds the migrations directory as a `&[Migration]` literal. Every
// migration must ship both an `.up.sql` and a `.down.sql` file.
fn main() {
    println!("cargo::rerun-if-changed=migrations");

    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let dest = PathBuf::from(std::env::var("OUT_DIR").unwrap()).join("migrations.rs");
    std::fs::write(&dest, render_migrations(&dir)).unwrap();
    println!("cargo::rustc-env=MIGRATIONS={}", dest.display());
}

fn render_migrations(dir: &Path) -> String {
    let mut names = dir
        .read_dir()
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .filter_map(|file| file.strip_suffix(".up.sql").map(str::to_owned))
        .collect::<Vec<_>>();
    names.sort_unstable();

    let mut out = String::from("&[");
    for name in names {
        let up = read_sql(dir, &name, "up");
        let down = read_sql(dir, &name, "down");
        out.push_str(&format!(
            "Migration{{name:{name:?},up:{up:?},down:{down:?}}},"
        ));
    }
    out.push(']');
    out
}

fn read_sql(dir: &Path, name: &str, direction: &str) -> String {
    let path = dir.join(format!("{name}.{direction}.sql"));
    std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("Failed to read {}: {err}", path.display()))
}
