use shadow_rs::ShadowBuilder;

fn main() {
    // Build metadata for `line-notify --version`
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
