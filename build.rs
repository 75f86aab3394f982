fn main() {
    // Only the mpg123 backend links a system library.
    if std::env::var_os("CARGO_FEATURE_MPG123").is_none() {
        return;
    }

    let target = std::env::var("TARGET").unwrap_or_default();

    if target.contains("musl") {
        // musl 目标：使用手动编译的静态库，不依赖 pkg-config
        if let Ok(sysroot) = std::env::var("MUSL_SYSROOT") {
            println!("cargo:rustc-link-search=native={}/usr/lib", sysroot);
        }
        println!("cargo:rustc-link-lib=static=mpg123");
        return;
    }

    // 其他目标：通过 pkg-config 查找 libmpg123
    pkg_config::Config::new()
        .probe("libmpg123")
        .expect("Failed to find libmpg123. Please install libmpg123-dev.");
}
