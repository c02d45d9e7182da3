fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Compile the proto file for the sentiment client (and the test server)
    tonic_build::compile_protos("../../proto/sentiment.proto")?;
    Ok(())
}
