// Document rendering for selected blocks. Only a LaTeX "default" template
// exists; PDF compilation happens outside this service.

pub mod latex;
