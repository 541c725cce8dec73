mod transcript_service_test;
