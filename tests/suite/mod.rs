mod documents;
mod equivalence;
mod scenarios;
