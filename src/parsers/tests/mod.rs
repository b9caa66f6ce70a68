mod chapter_parser_tests;
