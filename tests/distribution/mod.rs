mod reproducibility;
