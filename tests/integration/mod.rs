/// Integration tests: full sessions against on-disk sheets
mod session_workflow;
