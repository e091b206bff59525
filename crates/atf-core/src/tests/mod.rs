mod navigator_tests;
