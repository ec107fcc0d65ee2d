mod throughput;
