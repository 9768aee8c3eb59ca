mod body;
mod equivalence;
mod equivalence_props;
mod printing;
