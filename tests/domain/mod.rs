mod avatar_test;
mod call_id_test;
mod event_test;
mod meeting_status_test;
