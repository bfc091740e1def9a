fn main() {
    // Accessors land in $OUT_DIR/accessors and are only used by tests (via include!)
    dbaccessor_codegen::generate_from_cargo_metadata().expect("codegen failed");
}
