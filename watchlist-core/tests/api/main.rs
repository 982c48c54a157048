mod appwrite_store;
mod catalog;
mod saved_movies;
