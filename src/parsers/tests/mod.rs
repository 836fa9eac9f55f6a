mod content_kind_tests;
