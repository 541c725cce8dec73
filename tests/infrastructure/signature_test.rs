use parley::infrastructure::realtime::WebhookSignature;

#[test]
fn accepts_its_own_signature() {
    let verifier = WebhookSignature::new("secret");
    let body = br#"{"type":"call.session_started"}"#;

    let signature = verifier.sign(body);
    assert!(verifier.verify(body, &signature));
}

#[test]
fn rejects_a_tampered_body() {
    let verifier = WebhookSignature::new("secret");
    let signature = verifier.sign(b"original body");

    assert!(!verifier.verify(b"tampered body", &signature));
}

#[test]
fn rejects_a_signature_from_a_different_secret() {
    let signer = WebhookSignature::new("other-secret");
    let verifier = WebhookSignature::new("secret");
    let body = b"payload";

    assert!(!verifier.verify(body, &signer.sign(body)));
}

#[test]
fn rejects_non_hex_signatures_without_panicking() {
    let verifier = WebhookSignature::new("secret");

    assert!(!verifier.verify(b"payload", "not-hex!"));
    assert!(!verifier.verify(b"payload", ""));
}

#[test]
fn tolerates_surrounding_whitespace_in_the_header() {
    let verifier = WebhookSignature::new("secret");
    let body = b"payload";
    let signature = format!(" {} ", verifier.sign(body));

    assert!(verifier.verify(body, &signature));
}
