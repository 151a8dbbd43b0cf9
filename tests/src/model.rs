mod aggregation;
mod end_to_end;
