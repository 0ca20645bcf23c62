pub mod helper_functions;
