mod signature_test;
mod transcript_store_test;
