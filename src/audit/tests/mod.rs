mod concurrency;
mod recovery;
