#![no_main]

use hmxml::codec::CodecConfig;
use hmxml::registry::Registry;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parsing must either succeed or fail with an error, never panic
    let registry = Registry::default();
    let Ok(document) = registry.parse(data) else {
        return;
    };

    // Anything that parsed must serialize (or report a missing required field)
    // and the output must parse again in both modes
    if let Ok(output) = registry.serialize(&document) {
        let _ = registry.parse(&output);
        let _ = Registry::new(CodecConfig::strict()).parse(&output);
    }

    let _ = document.to_json();
    let _ = hmxml::validator::validate_document(&document, "fuzz");
});
